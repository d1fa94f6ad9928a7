fn main() {
    // Embeds the package version and git commit into `fgsheet --version` log lines.
    built::write_built_file().expect("Failed to acquire build-time information");
}
