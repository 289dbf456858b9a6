// Mirrors `static/` into `dist/` so the site can be deployed as plain files.
use std::path::Path;

use fs_extra::dir::{copy, CopyOptions};

fn main() {
    println!("cargo:rerun-if-changed=static");

    let static_dir = Path::new("static");
    let out_dir = Path::new("dist");
    if !static_dir.exists() {
        return;
    }
    if out_dir.exists() {
        std::fs::remove_dir_all(out_dir).ok();
    }
    if let Err(e) = std::fs::create_dir_all(out_dir) {
        println!("cargo:warning=cannot create dist/: {e}");
        return;
    }

    let mut options = CopyOptions::new();
    options.content_only = true;
    options.overwrite = true;
    if let Err(e) = copy(static_dir, out_dir, &options) {
        println!("cargo:warning=copying static/ to dist/ failed: {e}");
    }
}
