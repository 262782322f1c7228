use chrono::Utc;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=WIFI_SSID");
    println!("cargo:rerun-if-env-changed=WIFI_PASSWORD");
    println!("cargo:rerun-if-env-changed=TILT_LOG");

    let version = std::env::var("CARGO_PKG_VERSION").unwrap_or_default();
    let stamp = Utc::now().format("%Y%m%d%H%M");
    println!("cargo:rustc-env=BUILD_VERSION={version}+{stamp}");

    println!("cargo:rustc-link-arg-bins=-Tlinkall.x");
}
