//! Injectable 派生宏实现

use crate::utils::{extract_arc_inner, has_inject_flag};
use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, Result, Token, Type};

/// 结构体级别的 #[inject(...)] 参数
#[derive(Default)]
pub struct InjectArgs {
    /// 声明满足的服务契约
    pub implements: Vec<Type>,
    /// 是否需要在容器释放时调用 Dispose
    pub dispose: bool,
}

impl InjectArgs {
    /// 从结构体属性中解析参数
    pub fn from_attributes(attrs: &[syn::Attribute]) -> Result<Self> {
        let mut args = InjectArgs::default();

        for attr in attrs {
            if !attr.path().is_ident("inject") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("implements") {
                    let content;
                    syn::parenthesized!(content in meta.input);
                    let services = Punctuated::<Type, Token![,]>::parse_terminated(&content)?;
                    args.implements.extend(services);
                    Ok(())
                } else if meta.path.is_ident("dispose") {
                    args.dispose = true;
                    Ok(())
                } else {
                    Err(meta.error("未知的 inject 属性, 可用: implements(...), dispose"))
                }
            })?;
        }

        Ok(args)
    }
}

/// 单个字段的初始化方式
enum FieldInit {
    /// 作为依赖注入，保存服务类型
    Dependency(Type),
    /// 使用 Default::default()
    Default,
}

/// 实现 #[derive(Injectable)] 宏
pub fn derive_injectable_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new(
            input.generics.span(),
            "Injectable 不支持泛型类型, 请为具体类型手写 type_descriptor",
        ));
    }

    let data = match &input.data {
        Data::Struct(data) => data,
        _ => {
            return Err(syn::Error::new(
                struct_name.span(),
                "Injectable 只能用于结构体",
            ))
        }
    };

    let args = InjectArgs::from_attributes(&input.attrs)?;
    let inits = collect_field_inits(&data.fields)?;

    let params = inits.iter().filter_map(|init| match init {
        FieldInit::Dependency(service) => Some(quote! { .param::<#service>() }),
        FieldInit::Default => None,
    });

    let values = inits.iter().map(|init| match init {
        FieldInit::Dependency(service) => quote! { args.take::<#service>()? },
        FieldInit::Default => quote! { ::core::default::Default::default() },
    });

    let construct = match &data.fields {
        Fields::Named(named) => {
            let names = named.named.iter().map(|field| &field.ident);
            quote! { Self { #(#names: #values),* } }
        }
        Fields::Unnamed(_) => quote! { Self( #(#values),* ) },
        Fields::Unit => quote! { Self },
    };

    let has_dependencies = inits
        .iter()
        .any(|init| matches!(init, FieldInit::Dependency(_)));
    let closure_arg = if has_dependencies {
        quote! { args }
    } else {
        quote! { _ }
    };

    let contracts = args.implements.iter().map(|service| {
        quote! { .implements::<#service>() }
    });

    let disposable = if args.dispose {
        quote! { .disposable() }
    } else {
        quote! {}
    };

    let implements_impls = args.implements.iter().map(|service| {
        quote_spanned! {service.span()=>
            impl ::inject_abstractions::Implements<#service> for #struct_name {
                fn upcast(self: ::std::sync::Arc<Self>) -> ::std::sync::Arc<#service> {
                    self
                }
            }
        }
    });

    Ok(quote! {
        impl ::inject_abstractions::Injectable for #struct_name {
            fn type_descriptor() -> ::inject_abstractions::TypeDescriptor {
                ::inject_abstractions::TypeDescriptor::concrete::<Self>()
                    #(#contracts)*
                    .constructor(
                        ::inject_abstractions::ConstructorDescriptor::of::<Self>()
                            #(#params)*
                            .build(|#closure_arg| ::core::result::Result::Ok(#construct)),
                    )
                    #disposable
                    .build()
            }
        }

        #(#implements_impls)*
    })
}

fn collect_field_inits(fields: &Fields) -> Result<Vec<FieldInit>> {
    fields
        .iter()
        .map(|field| {
            if has_inject_flag(&field.attrs, "default")? {
                return Ok(FieldInit::Default);
            }

            extract_arc_inner(&field.ty)
                .map(|service| FieldInit::Dependency(service.clone()))
                .ok_or_else(|| {
                    syn::Error::new(
                        field.ty.span(),
                        "依赖字段必须是 Arc<T>, 其它字段请标注 #[inject(default)]",
                    )
                })
        })
        .collect()
}
