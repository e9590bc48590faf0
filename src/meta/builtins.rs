//! Built-in meta types

use super::registry::MetaTypeRegistry;
use super::RawType;

crate::declare_metatype!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, String,
);

/// Names registered by `MetaTypeRegistry::with_builtins`
pub const BUILTIN_NAMES: &[&str] = &[
    "bool", "char", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128",
    "usize", "f32", "f64", "String",
];

pub(crate) fn builtin_types() -> [RawType; 17] {
    [
        RawType::of::<bool>(),
        RawType::of::<char>(),
        RawType::of::<i8>(),
        RawType::of::<i16>(),
        RawType::of::<i32>(),
        RawType::of::<i64>(),
        RawType::of::<i128>(),
        RawType::of::<isize>(),
        RawType::of::<u8>(),
        RawType::of::<u16>(),
        RawType::of::<u32>(),
        RawType::of::<u64>(),
        RawType::of::<u128>(),
        RawType::of::<usize>(),
        RawType::of::<f32>(),
        RawType::of::<f64>(),
        RawType::of::<String>(),
    ]
}

pub(crate) fn register_builtins(registry: &MetaTypeRegistry) {
    for (raw, name) in builtin_types().into_iter().zip(BUILTIN_NAMES) {
        registry.insert_raw(raw, name);
    }
}
