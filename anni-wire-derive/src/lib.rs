use proc_macro::TokenStream;
use proc_macro2::{TokenStream as TokenStream2, TokenTree};
use quote::quote;
use syn::{
    parse_macro_input, parse_quote, Data, DataStruct, DeriveInput, Fields, GenericParam, Ident,
    Index, Member,
};

/// Generates `anni_wire::Field` and `anni_wire::Record` for a struct.
///
/// Fields are walked in declaration order. Every field type must implement
/// `anni_wire::Field`. Type parameters get that bound, and every field type
/// mentioning a type parameter gets it as a where-clause predicate, so
/// `Vec<T>` fields pick up the `T: Default` they need.
#[proc_macro_derive(Record)]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    expand(ast)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

fn expand(mut ast: DeriveInput) -> syn::Result<TokenStream2> {
    let fields = match &ast.data {
        Data::Struct(DataStruct { fields, .. }) => fields.clone(),
        Data::Enum(e) => {
            return Err(syn::Error::new_spanned(
                e.enum_token,
                "Record can only be derived for structs",
            ))
        }
        Data::Union(u) => {
            return Err(syn::Error::new_spanned(
                u.union_token,
                "Record can only be derived for structs",
            ))
        }
    };

    let mut params = Vec::new();
    for param in ast.generics.params.iter_mut() {
        if let GenericParam::Type(ty) = param {
            ty.bounds.push(parse_quote!(::anni_wire::Field));
            params.push(ty.ident.clone());
        }
    }

    let (members, names, types): (Vec<Member>, Vec<String>, Vec<syn::Type>) = match fields {
        Fields::Named(named) => named
            .named
            .into_iter()
            .map(|f| {
                let ident = f.ident.expect("named field without ident");
                (Member::Named(ident.clone()), ident.to_string(), f.ty)
            })
            .fold((vec![], vec![], vec![]), unzip3),
        Fields::Unnamed(unnamed) => unnamed
            .unnamed
            .into_iter()
            .enumerate()
            .map(|(i, f)| (Member::Unnamed(Index::from(i)), i.to_string(), f.ty))
            .fold((vec![], vec![], vec![]), unzip3),
        Fields::Unit => (vec![], vec![], vec![]),
    };

    if !params.is_empty() {
        let where_clause = ast.generics.make_where_clause();
        for ty in types.iter() {
            if mentions_any(quote!(#ty), &params) {
                where_clause
                    .predicates
                    .push(parse_quote!(#ty: ::anni_wire::Field));
            }
        }
    }

    let name = &ast.ident;
    let name_str = name.to_string();
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::anni_wire::Field for #name #ty_generics #where_clause {
            const SHAPE: ::anni_wire::Shape = ::anni_wire::Shape::Struct {
                name: #name_str,
                fields: &[
                    #(::anni_wire::FieldDescriptor::new(
                        #names,
                        <#types as ::anni_wire::Field>::shape,
                    ),)*
                ],
            };

            fn view(&self) -> ::anni_wire::FieldRef<'_> {
                ::anni_wire::FieldRef::Struct(self)
            }

            fn view_mut(&mut self) -> ::anni_wire::FieldMut<'_> {
                ::anni_wire::FieldMut::Struct(self)
            }
        }

        impl #impl_generics ::anni_wire::Record for #name #ty_generics #where_clause {
            fn fields(&self) -> &'static [::anni_wire::FieldDescriptor] {
                <Self as ::anni_wire::Field>::SHAPE.fields()
            }

            #[allow(unused_variables)]
            fn visit(
                &self,
                visitor: &mut dyn FnMut(
                    ::anni_wire::FieldRef<'_>,
                ) -> ::core::result::Result<(), ::anni_wire::WireError>,
            ) -> ::core::result::Result<(), ::anni_wire::WireError> {
                #(visitor(::anni_wire::Field::view(&self.#members))?;)*
                ::core::result::Result::Ok(())
            }

            #[allow(unused_variables)]
            fn visit_mut(
                &mut self,
                visitor: &mut dyn FnMut(
                    ::anni_wire::FieldMut<'_>,
                ) -> ::core::result::Result<(), ::anni_wire::WireError>,
            ) -> ::core::result::Result<(), ::anni_wire::WireError> {
                #(visitor(::anni_wire::Field::view_mut(&mut self.#members))?;)*
                ::core::result::Result::Ok(())
            }
        }
    })
}

fn mentions_any(tokens: TokenStream2, params: &[Ident]) -> bool {
    tokens.into_iter().any(|token| match token {
        TokenTree::Ident(ident) => params.contains(&ident),
        TokenTree::Group(group) => mentions_any(group.stream(), params),
        _ => false,
    })
}

type Columns<A, B, C> = (Vec<A>, Vec<B>, Vec<C>);

fn unzip3<A, B, C>(mut acc: Columns<A, B, C>, (a, b, c): (A, B, C)) -> Columns<A, B, C> {
    acc.0.push(a);
    acc.1.push(b);
    acc.2.push(c);
    acc
}
