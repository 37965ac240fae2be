use proc_macro::TokenStream;

mod lebwrap;

/// Derive `leb_wrap::Encode` and `leb_wrap::Decode` implementations.
///
/// Struct fields are written in declaration order without any framing.
/// Enums are written as one byte discriminant followed by the fields of the variant, discriminants
/// follow Rust rules (explicit integer literal or previous + 1) and must fit into u8.
/// Generic type parameters get the respective trait bound.
#[proc_macro_derive(LebWrap)]
pub fn derive_leb_wrap(item: TokenStream) -> TokenStream {
    lebwrap::leb_wrap_derive(item.into()).into()
}
