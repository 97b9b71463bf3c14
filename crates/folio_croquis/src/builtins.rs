//! Attributes understood by the schema compiler itself.
//!
//! These may appear in metadata lists without an `attribute` declaration.
//! They are never linked and never reported as unresolved.

use phf::phf_set;

static BUILTIN_ATTRIBUTES_SET: phf::Set<&'static str> = phf_set! {
    // Layout and evolution
    "id",
    "deprecated",
    "required",
    "key",
    "force_align",
    "bit_flags",
    "original_order",
    "padding",
    // Nested data
    "nested_flatbuffer",
    "flexbuffer",
    "hash",
    "shared",
    // Code generation
    "native_inline",
    "native_default",
    "native_custom_alloc",
    "native_type",
    "native_type_pack_name",
    "cpp_type",
    "cpp_ptr_type",
    "cpp_ptr_type_get",
    "cpp_str_type",
    "cpp_str_flex_ctor",
    "csharp_partial",
    "private",
    // RPC
    "idempotent",
    "streaming",
};

/// Check if a metadata name is a compiler-defined attribute.
#[inline]
pub fn is_builtin_attribute(name: &str) -> bool {
    BUILTIN_ATTRIBUTES_SET.contains(name)
}
