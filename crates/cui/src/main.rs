use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    if let Some(path) = std::env::var_os("LOTTO_LOG_FILE") {
        lotto_cui::init_file_logging(&PathBuf::from(path))?;
    }
    let args: Vec<String> = std::env::args().skip(1).collect();
    lotto_cui::run_with_args(&args)
}
