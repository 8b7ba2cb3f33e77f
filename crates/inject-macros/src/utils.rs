//! 宏工具函数

use syn::{Attribute, GenericArgument, PathArguments, Type};

/// 从类型中提取泛型参数
pub fn extract_generic_type(ty: &Type) -> Option<&Type> {
    if let Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            if let PathArguments::AngleBracketed(args) = &segment.arguments {
                if let Some(GenericArgument::Type(inner_type)) = args.args.first() {
                    return Some(inner_type);
                }
            }
        }
    }
    None
}

/// 检查类型是否为 Arc<T>
pub fn is_arc_type(ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .map(|segment| segment.ident == "Arc")
            .unwrap_or(false),
        _ => false,
    }
}

/// 提取 Arc<T> 中的 T
pub fn extract_arc_inner(ty: &Type) -> Option<&Type> {
    if is_arc_type(ty) {
        extract_generic_type(ty)
    } else {
        None
    }
}

/// 属性列表中是否有 #[inject(...)] 且包含指定标记
pub fn has_inject_flag(attrs: &[Attribute], flag: &str) -> syn::Result<bool> {
    let mut found = false;

    for attr in attrs {
        if !attr.path().is_ident("inject") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident(flag) {
                found = true;
                Ok(())
            } else {
                Err(meta.error("未知的 inject 字段属性"))
            }
        })?;
    }

    Ok(found)
}
