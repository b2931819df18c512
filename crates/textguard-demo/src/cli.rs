use clap::Parser;
use textguard_model::DeviceType;

#[derive(Parser, Debug)]
#[command(name = "textguard-demo")]
#[command(
    author,
    version,
    about = "Interactive spam/suspicious-text classification demo"
)]
pub struct Cli {
    /// Listen port
    #[arg(short, long, default_value = "3000")]
    pub port: u16,

    /// Listen address
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Model location: a local artifact directory, or an http(s) URL of a
    /// ZIP archive containing one
    #[arg(short, long, default_value = "./textguard_bert", env = "TEXTGUARD_MODEL")]
    pub model: String,

    /// Expected artifact directory name inside a remote archive
    #[arg(long, default_value = "textguard_bert")]
    pub archive_root: String,

    /// Inference device: cpu, cuda[:N], or metal[:N]
    #[arg(long, default_value = "cpu", value_parser = parse_device)]
    pub device: DeviceType,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_device(s: &str) -> Result<DeviceType, String> {
    let (kind, index) = match s.split_once(':') {
        Some((kind, idx)) => {
            let idx = idx
                .parse::<usize>()
                .map_err(|_| format!("invalid device index in '{s}'"))?;
            (kind, idx)
        }
        None => (s, 0),
    };

    match kind {
        "cpu" => Ok(DeviceType::Cpu),
        "cuda" => Ok(DeviceType::Cuda(index)),
        "metal" => Ok(DeviceType::Metal(index)),
        other => Err(format!(
            "unknown device '{other}' (expected cpu, cuda[:N], or metal[:N])"
        )),
    }
}
