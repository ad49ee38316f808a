use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mojifix_core::{repair, scan_and_write, RepairGate, ScanOptions};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::PathBuf;
use tracing::info;

/// 命令行入口（基于 clap）
#[derive(Parser, Debug)]
#[command(name = "mojifix", version, about = "Latin-1/UTF-8 乱码修复工具")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 修复单段文本并输出到 stdout（缺省从 stdin 读到 EOF）
    Repair {
        /// 待修复文本；缺省读 stdin
        text: Option<String>,
    },
    /// 扫描目录并生成修复报告
    Scan {
        /// 输入目录（递归遍历）
        #[arg(long)]
        input: PathBuf,

        /// 输出报告文件（JSON 对象）
        #[arg(long, default_value = "./report.json")]
        output: PathBuf,

        /// 线程数（"auto"=CPU 核心数；1 走串行）
        #[arg(long, default_value = "auto")]
        threads: String,

        /// 最大扫描文件大小（单位字节，例如 5242880 代表 5MB）
        #[arg(long)]
        max_file_size: Option<u64>,

        /// 规则文件路径（TOML），默认 ./rules/default.toml，缺失时用内置规则
        #[arg(long)]
        rules: Option<PathBuf>,

        /// 修复门控：non-ascii（默认）或 flagged（仅规则命中的行）
        #[arg(long, default_value = "non-ascii", value_parser = ["non-ascii", "flagged"])]
        gate: String,

        /// 原地改写有命中的文件
        #[arg(long)]
        fix: bool,
    },
}

fn main() -> Result<()> {
    // 初始化日志（支持通过 RUST_LOG 控制等级，例如 info、debug）
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Repair { text } => {
            let input = match text {
                Some(t) => t,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("read stdin")?;
                    buf
                }
            };
            let mut out = std::io::stdout();
            out.write_all(repair(&input).as_bytes()).context("write stdout")?;
            out.flush().ok();
        }
        Commands::Scan { input, output, threads, max_file_size, rules, gate, fix } => {
            info!(?input, ?output, "starting scan");

            // 以缓冲方式打开输出文件，流式写入报告
            let mut out = BufWriter::new(File::create(&output).context("create output file")?);

            let gate = match gate.as_str() {
                "flagged" => RepairGate::Flagged,
                _ => RepairGate::NonAscii,
            };
            // 解析线程参数："auto" 表示自动（等于 CPU 核数）；其他为具体数值
            let threads_opt = parse_threads(&threads);

            let opts = ScanOptions { max_file_size, gate, rules_path: rules, threads: threads_opt, fix };
            let stats = scan_and_write(&input, &mut out, &opts).context("scan and write failed")?;
            out.flush().ok();

            info!(
                session = %stats.session,
                files_scanned = stats.files_scanned,
                files_skipped = stats.files_skipped,
                files_changed = stats.files_changed,
                lines_suspicious = stats.lines_suspicious,
                findings_written = stats.findings_written,
                "scan finished"
            );
        }
    }

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // 支持通过环境变量 RUST_LOG 控制日志等级，如：RUST_LOG=debug
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// 解析线程参数
fn parse_threads(s: &str) -> Option<usize> {
    if s.eq_ignore_ascii_case("auto") { return None; }
    match s.parse::<usize>() {
        Ok(n) if n >= 1 => Some(n),
        _ => None,
    }
}
