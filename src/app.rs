use crate::config::Config;
use crate::engine::CalcError;
use crate::i18n::{self, Translator};
use crate::report::ReportError;
use crate::ui_cli::{self, MenuChoice};

/// 应用运行期间可能出现的错误。
#[derive(Debug)]
pub enum AppError {
    /// 文件读写错误
    Io(std::io::Error),
    /// 设置加载/保存错误
    Config(crate::config::ConfigError),
    /// 公式计算错误
    Calc(CalcError),
    /// 计算书导出错误
    Report(ReportError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "输入输出错误: {e}"),
            AppError::Config(e) => write!(f, "设置错误: {e}"),
            AppError::Calc(e) => write!(f, "计算错误: {e}"),
            AppError::Report(e) => write!(f, "计算书错误: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(value: crate::config::ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<CalcError> for AppError {
    fn from(value: CalcError) -> Self {
        AppError::Calc(value)
    }
}

impl From<ReportError> for AppError {
    fn from(value: ReportError) -> Self {
        AppError::Report(value)
    }
}

/// 运行 CLI 应用的主循环。计算与导出错误提示后继续，IO 错误向上抛出。
pub fn run(config: &mut Config, tr: &Translator) -> Result<(), AppError> {
    // 已锁定的临界流速，用于流态对比
    let mut locked_vc: Option<f64> = None;
    loop {
        match ui_cli::main_menu(tr)? {
            MenuChoice::Formula(id) => {
                if let Err(e) = ui_cli::handle_formula(tr, config, id, &mut locked_vc) {
                    match &e {
                        AppError::Calc(_) | AppError::Report(_) => {
                            println!("{}: {e}", tr.t(i18n::keys::ERROR_PREFIX));
                        }
                        _ => return Err(e),
                    }
                }
            }
            MenuChoice::Settings => {
                ui_cli::handle_settings(tr, config)?;
                config.save()?;
            }
            MenuChoice::Exit => {
                config.save()?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
