use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::{
    Data, DataEnum, DataStruct, DeriveInput, Expr, Fields, GenericParam, Generics, Ident, Lit,
    parse_quote,
};

pub fn leb_wrap_derive(item: TokenStream) -> TokenStream {
    let input = match syn::parse2::<DeriveInput>(item) {
        Ok(i) => i,
        Err(e) => return e.to_compile_error(),
    };
    leb_wrap_derive_inner(input)
        .unwrap_or_else(|e| syn::Error::new(Span::call_site(), e).to_compile_error())
}

fn leb_wrap_derive_inner(input: DeriveInput) -> Result<TokenStream, String> {
    let (encode_body, decode_body) = match &input.data {
        Data::Struct(data_struct) => struct_serdes(data_struct),
        Data::Enum(data_enum) => enum_serdes(data_enum)?,
        Data::Union(_) => return Err("LebWrap can only be derived for structs and enums".into()),
    };

    let name = &input.ident;
    let encode_generics = with_bound(&input.generics, quote! { ::leb_wrap::Encode });
    let (impl_generics, ty_generics, where_clause) = encode_generics.split_for_impl();
    let encode_impl = quote! {
        impl #impl_generics ::leb_wrap::Encode for #name #ty_generics #where_clause {
            fn encode<__W: ::leb_wrap::Writer + ?Sized>(&self, wr: &mut __W) -> ::core::result::Result<(), ::leb_wrap::Error> {
                #encode_body
            }
        }
    };

    let decode_generics = with_bound(&input.generics, quote! { ::leb_wrap::Decode });
    let (impl_generics, ty_generics, where_clause) = decode_generics.split_for_impl();
    let decode_impl = quote! {
        impl #impl_generics ::leb_wrap::Decode for #name #ty_generics #where_clause {
            fn decode<__R: ::leb_wrap::Reader + ?Sized>(rd: &mut __R) -> ::core::result::Result<Self, ::leb_wrap::Error> {
                #decode_body
            }
        }
    };

    Ok(quote! {
        #encode_impl
        #decode_impl
    })
}

fn with_bound(generics: &Generics, bound: TokenStream) -> Generics {
    let mut generics = generics.clone();
    for param in generics.params.iter_mut() {
        if let GenericParam::Type(ty) = param {
            ty.bounds.push(parse_quote!(#bound));
        }
    }
    generics
}

fn struct_serdes(data_struct: &DataStruct) -> (TokenStream, TokenStream) {
    let bindings = field_bindings(&data_struct.fields);
    let encode_fields = bindings.iter().map(|binding| {
        quote! { ::leb_wrap::Encode::encode(#binding, wr)?; }
    });
    let construct = construct(quote! { Self }, &data_struct.fields);
    let destructure = destructure(quote! { Self }, &data_struct.fields, &bindings);
    let encode = quote! {
        let #destructure = self;
        #(#encode_fields)*
        Ok(())
    };
    let decode = quote! {
        Ok(#construct)
    };
    (encode, decode)
}

fn enum_serdes(data_enum: &DataEnum) -> Result<(TokenStream, TokenStream), String> {
    let discriminants = discriminants(data_enum)?;
    let mut encode_arms = Vec::new();
    let mut decode_arms = Vec::new();
    for (variant, discriminant) in data_enum.variants.iter().zip(discriminants) {
        let ident = &variant.ident;
        let path = quote! { Self::#ident };
        let bindings = field_bindings(&variant.fields);
        let destructure = destructure(path.clone(), &variant.fields, &bindings);
        encode_arms.push(quote! {
            #destructure => {
                ::leb_wrap::Writer::write_u8(wr, #discriminant)?;
                #(::leb_wrap::Encode::encode(#bindings, wr)?;)*
            }
        });
        let construct = construct(path, &variant.fields);
        decode_arms.push(quote! {
            #discriminant => Ok(#construct),
        });
    }

    let encode = if encode_arms.is_empty() {
        quote! { match *self {} }
    } else {
        quote! {
            match self {
                #(#encode_arms)*
            }
            Ok(())
        }
    };
    let decode = quote! {
        match ::leb_wrap::Reader::read_u8(rd)? {
            #(#decode_arms)*
            other => Err(::leb_wrap::Error::UnknownDiscriminant(other)),
        }
    };
    Ok((encode, decode))
}

/// Explicit integer literal or previous discriminant + 1, starting from 0.
fn discriminants(data_enum: &DataEnum) -> Result<Vec<u8>, String> {
    let mut next: u32 = 0;
    let mut discriminants = Vec::with_capacity(data_enum.variants.len());
    for variant in &data_enum.variants {
        let discriminant = if let Some((_, expr)) = &variant.discriminant {
            let Expr::Lit(expr) = expr else {
                return Err("Only literal discriminants are supported".into());
            };
            let Lit::Int(lit) = &expr.lit else {
                return Err("Only integer discriminants are supported".into());
            };
            lit.base10_parse::<u32>().map_err(|e| e.to_string())?
        } else {
            next
        };
        let discriminant = u8::try_from(discriminant).map_err(|_| {
            format!(
                "Discriminant of '{}' is {discriminant}, maximum supported is 255",
                variant.ident
            )
        })?;
        if discriminants.contains(&discriminant) {
            return Err(format!("Duplicate discriminant {discriminant}"));
        }
        discriminants.push(discriminant);
        next = discriminant as u32 + 1;
    }
    Ok(discriminants)
}

fn field_bindings(fields: &Fields) -> Vec<Ident> {
    (0..fields.len())
        .map(|i| format_ident!("__field{}", i))
        .collect()
}

/// Pattern binding every field by reference, `Path { a: __field0 }` or `Path(__field0)`.
fn destructure(path: TokenStream, fields: &Fields, bindings: &[Ident]) -> TokenStream {
    match fields {
        Fields::Named(named) => {
            let names = named.named.iter().filter_map(|f| f.ident.as_ref());
            quote! { #path { #(#names: #bindings),* } }
        }
        Fields::Unnamed(_) => quote! { #path ( #(#bindings),* ) },
        Fields::Unit => quote! { #path },
    }
}

/// Expression decoding every field in declaration order.
fn construct(path: TokenStream, fields: &Fields) -> TokenStream {
    match fields {
        Fields::Named(named) => {
            let names = named.named.iter().filter_map(|f| f.ident.as_ref());
            quote! { #path { #(#names: ::leb_wrap::Decode::decode(rd)?),* } }
        }
        Fields::Unnamed(unnamed) => {
            let decode = unnamed
                .unnamed
                .iter()
                .map(|_| quote! { ::leb_wrap::Decode::decode(rd)? });
            quote! { #path ( #(#decode),* ) }
        }
        Fields::Unit => quote! { #path },
    }
}
