use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("tripnotes")
        .version("0.1.0")
        .author("Tripnotes Contributors")
        .about("Collect, categorize, and render travel notes")
        .arg(
            clap::arg!(--output_dir <DIR> "Artifact directory for intermediate and rendered files")
                .global(true)
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(--keywords <FILE> "Keyword/template config file")
                .global(true)
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .subcommand(clap::Command::new("login").about("Open a browser window for manual login"))
        .subcommand(
            clap::Command::new("search")
                .about("Search one query and save the collected notes")
                .arg(clap::arg!(<QUERY> "Search phrase"))
                .arg(clap::arg!(--limit <N> "Maximum notes to collect").default_value("30"))
                .arg(clap::arg!(--headless "Run the browser without a visible window")),
        )
        .subcommand(
            clap::Command::new("destination")
                .about("Collect notes for every query variant of a destination")
                .arg(clap::arg!(<NAME> "Destination name"))
                .arg(clap::arg!(--limit <N> "Total note budget").default_value("30"))
                .arg(clap::arg!(--headless "Run the browser without a visible window")),
        )
        .subcommand(
            clap::Command::new("categorize")
                .about("Categorize a collected notes artifact")
                .arg(clap::arg!(--input <FILE> "Notes artifact").required(true)),
        )
        .subcommand(
            clap::Command::new("render")
                .about("Render the mindmap and report from a categorized artifact")
                .arg(clap::arg!(--input <FILE> "Categorized artifact").required(true))
                .arg(clap::arg!(--destination <NAME> "Destination name").required(true)),
        );

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "tripnotes", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "tripnotes", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "tripnotes", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "tripnotes", &completions_dir)
        .unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
