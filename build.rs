// build.rs

use clap::{Arg, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

fn build_cli() -> Command {
    Command::new("appcast-server")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Appcast Server Contributors")
        .about("Basic auto-update server for development purposes")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("dir")
                .long("dir")
                .value_name("PATH")
                .help("Directory where the update files are"),
        )
        .arg(Arg::new("port").long("port").value_name("PORT").help("Port number"))
        .arg(
            Arg::new("address")
                .long("address")
                .value_name("HOST")
                .help("Address (host name or IP) to bind to"),
        )
        .arg(
            Arg::new("app_name")
                .long("app-name")
                .value_name("NAME")
                .help("Application name served in request paths"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(clap::ArgAction::SetTrue)
                .help("Log every request outcome (same as RUST_LOG=debug)"),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Create man directory - use CARGO_MANIFEST_DIR which is always set by cargo
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("appcast-server.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
