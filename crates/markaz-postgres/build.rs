#![forbid(unsafe_code)]

//! The `embed_migrations!` macro does not automatically recompile when the
//! migration directory changes, so the build script tracks it explicitly.

fn main() {
    println!("cargo:rerun-if-changed=./migrations");
}
