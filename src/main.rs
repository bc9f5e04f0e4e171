use clap::Parser;

use slurry_pipeline_toolbox::{app, config, i18n};

/// 命令行参数。
#[derive(Parser)]
#[command(name = "slurry_pipeline_toolbox")]
#[command(about = "浆体管道临界流速计算工具", long_about = None)]
struct Cli {
    /// 界面语言（zh-cn/en-us/auto）
    #[arg(long, default_value = "auto")]
    lang: String,
    /// 语言包目录，默认 locales/
    #[arg(long)]
    pack_dir: Option<String>,
}

/// 程序入口。加载设置与语言包后运行 CLI 应用。
fn main() {
    if let Err(err) = try_run() {
        eprintln!("错误: {err}");
    }
}

fn try_run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut cfg = config::load_or_default()?;
    let lang = i18n::resolve_language(&cli.lang, cfg.language.as_deref());
    let tr = i18n::Translator::new_with_pack(&lang, cli.pack_dir.as_deref());
    app::run(&mut cfg, &tr)?;
    Ok(())
}
