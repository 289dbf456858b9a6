//! Host-side helper: `cargo run` compiles the gallery to WASM into
//! `static/pkg` and serves `static/` locally.

use std::io;
use std::process::{Command, ExitCode, Stdio};
use std::{env, thread, time::Duration};

const DEFAULT_PORT: &str = "8000";

fn wasm_pack() -> io::Result<bool> {
    println!("Building WASM pkg …");
    let status = Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
        .status()?;
    Ok(status.success())
}

fn serve(port: &str) -> io::Result<()> {
    println!("Serving gallery at http://127.0.0.1:{port}/ …");
    let mut server = Command::new("python3")
        .args(["-m", "http.server", port, "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::inherit())
        .spawn()?;
    loop {
        if let Some(status) = server.try_wait()? {
            eprintln!("http server exited: {status}");
            return Ok(());
        }
        thread::sleep(Duration::from_secs(1));
    }
}

fn main() -> ExitCode {
    match wasm_pack() {
        Ok(true) => {}
        Ok(false) => {
            eprintln!("wasm-pack finished with errors");
            return ExitCode::FAILURE;
        }
        Err(_) => {
            eprintln!("wasm-pack not found in PATH; serving whatever is already in static/pkg");
        }
    }

    let port = env::var("GALLERY_PORT").unwrap_or_else(|_| DEFAULT_PORT.to_string());
    match serve(&port) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("failed to start http server: {e}");
            ExitCode::FAILURE
        }
    }
}
