use proc_macro::TokenStream;
use quote::quote;

#[derive(deluxe::ParseMetaItem)]
#[deluxe(attributes(scoring_feature))]
struct FeatureAttributes(syn::Ident, #[deluxe(flatten)] FeatureNamedAttributes);

#[derive(deluxe::ParseMetaItem)]
struct FeatureNamedAttributes {
  name: String,
}

/// Turn a `matches` function into a unit struct implementing `Feature`.
///
/// The annotated function must be named `matches` and take `entry` as its
/// first argument after `&self`, since the generated span records its GUID.
#[proc_macro_attribute]
pub fn scoring_feature(attrs: TokenStream, input: TokenStream) -> TokenStream {
  let FeatureAttributes(ident, FeatureNamedAttributes { name }) = match deluxe::parse2::<FeatureAttributes>(attrs.into()) {
    Ok(attrs) => attrs,
    Err(err) => return err.into_compile_error().into(),
  };

  let input = proc_macro2::TokenStream::from(input);

  quote! {
      pub struct #ident;

      impl Feature for #ident {
        fn name(&self) -> &'static str {
            #name
        }

        #[tracing::instrument(level = "trace", name = #name, skip_all, fields(guid = entry.guid.as_str()))]
        #input
      }
  }
  .into()
}
