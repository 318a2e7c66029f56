use chrono::Utc;

fn main() {
    // Same shape as the C `__DATE__` macro, e.g. "Oct 17 2026".
    let build_date = Utc::now().format("%b %e %Y").to_string();
    println!("cargo:rustc-env=JSBRIDGE_BUILD_DATE={}", build_date);
    println!("cargo:rerun-if-changed=build.rs");
}
