use std::io::{self, Write};
use std::path::Path;

use crate::animation;
use crate::app::AppError;
use crate::catalog::{self, FormulaSpec, ParamSpec};
use crate::config::Config;
use crate::engine::{self, FormulaId, ParamSet, PrimaryResult, TermValue};
use crate::i18n::{keys, Translator};
use crate::report;

/// 主菜单选项。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Formula(FormulaId),
    Settings,
    Exit,
}

/// 显示主菜单并返回选择。公式条目按目录分组编号。
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    let mut entries = Vec::new();
    for (index, group) in catalog::GROUPS.iter().enumerate() {
        println!("[{}]", tr.text_or(&format!("group.{index}"), group.name));
        for spec in group.formulas {
            entries.push(spec.id);
            println!("{}) {}", entries.len(), formula_name(tr, spec));
        }
    }
    let settings_no = entries.len() + 1;
    println!("{settings_no}) {}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("0) {}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim().parse::<usize>() {
            Ok(0) => return Ok(MenuChoice::Exit),
            Ok(n) if n <= entries.len() => return Ok(MenuChoice::Formula(entries[n - 1])),
            Ok(n) if n == settings_no => return Ok(MenuChoice::Settings),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

fn formula_name(tr: &Translator, spec: &FormulaSpec) -> &'static str {
    tr.text_or(&format!("formula.{}.name", spec.id.as_str()), spec.name)
}

/// 选中公式后的完整交互：录入参数、计算、展示、流态对比、导出计算书。
pub fn handle_formula(
    tr: &Translator,
    cfg: &Config,
    id: FormulaId,
    locked_vc: &mut Option<f64>,
) -> Result<(), AppError> {
    let spec = catalog::find(id);
    println!("\n-- {} --", formula_name(tr, spec));
    println!("{}", spec.formula);
    if !spec.description.is_empty() {
        println!("{}", spec.description);
    }

    let params = read_params(tr, spec)?;
    let record = engine::evaluate(id, &params)?;

    println!("{}", tr.t(keys::RESULT_HEADING));
    let label = tr.text_or(
        &format!("result.{}", record.primary.key()),
        report::primary_label(&record.primary),
    );
    println!("{label}: {}", report::primary_display(&record));
    if matches!(record.primary, PrimaryResult::CriticalVelocity(None)) {
        println!("{}", tr.t(keys::RESULT_PENDING_DP));
    }
    if !record.intermediate.is_empty() {
        println!("{}", tr.t(keys::RESULT_INTERMEDIATE));
        for term in &record.intermediate {
            match &term.value {
                TermValue::Number(v) => {
                    println!("  {} = {v}", report::intermediate_label(term.key));
                }
                TermValue::Text(text) => {
                    println!("  {} = {text}", report::intermediate_label(term.key));
                }
            }
        }
    }

    if let PrimaryResult::CriticalVelocity(Some(vc)) = record.primary {
        if let Some(locked) = *locked_vc {
            let (ratio, state) = animation::compare_with_locked(vc, locked);
            println!("{} {ratio:.3}", tr.t(keys::LOCKED_VC_COMPARE));
            println!(
                "{} {} ({})",
                tr.t(keys::ANIMATION_LABEL),
                state.label(),
                state.as_str()
            );
        }
        let answer = read_line(tr.t(keys::PROMPT_LOCK_RESULT))?;
        if is_yes(&answer) {
            *locked_vc = Some(vc);
            println!("{} {vc} m/s", tr.t(keys::LOCKED_VC_SET));
        }
    }

    let answer = read_line(tr.t(keys::PROMPT_EXPORT_REPORT))?;
    if is_yes(&answer) {
        let path = report::export(Path::new(&cfg.export_dir), spec, &params, &record)?;
        println!("{} {}", tr.t(keys::EXPORT_DONE), path.display());
    }
    Ok(())
}

/// 按目录描述逐项录入参数。带默认值或可选的参数允许回车跳过，
/// 跳过时不写入参数集，由引擎自行补默认值并记录来源。
fn read_params(tr: &Translator, spec: &FormulaSpec) -> Result<ParamSet, AppError> {
    let mut params = ParamSet::new();
    for param in spec.params {
        let prompt = param_prompt(tr, param);
        if param.skippable() {
            if let Some(value) = read_optional_f64(tr, &prompt)? {
                params.set(param.key, value);
            }
        } else {
            params.set(param.key, read_f64(tr, &prompt)?);
        }
    }
    Ok(params)
}

fn param_prompt(tr: &Translator, param: &ParamSpec) -> String {
    let mut prompt = format!("{} {}", param.label, param.key);
    if !param.unit.is_empty() {
        prompt.push_str(&format!(" [{}]", param.unit));
    }
    if let Some(default) = param.default {
        prompt.push_str(&format!(" = {default}"));
        prompt.push_str(tr.t(keys::PROMPT_PARAM_WITH_DEFAULT));
    } else if param.optional {
        prompt.push_str(tr.t(keys::PROMPT_PARAM_OPTIONAL));
    }
    prompt.push_str(": ");
    prompt
}

/// 处理设置菜单。修改项立即写回调用方的 Config。
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!(
        "{} {}",
        tr.t(keys::SETTINGS_CURRENT_LANGUAGE),
        cfg.language.as_deref().unwrap_or("auto")
    );
    println!(
        "{} {}",
        tr.t(keys::SETTINGS_CURRENT_EXPORT_DIR),
        cfg.export_dir
    );
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    match sel.trim() {
        "" => return Ok(()),
        "1" => {
            let code = read_line(tr.t(keys::SETTINGS_PROMPT_LANGUAGE))?;
            let code = code.trim();
            if code.is_empty() {
                println!("{}", tr.t(keys::SETTINGS_INVALID));
                return Ok(());
            }
            cfg.language = Some(code.to_string());
        }
        "2" => {
            let dir = read_line(tr.t(keys::SETTINGS_PROMPT_EXPORT_DIR))?;
            let dir = dir.trim();
            if dir.is_empty() {
                println!("{}", tr.t(keys::SETTINGS_INVALID));
                return Ok(());
            }
            cfg.export_dir = dir.to_string();
        }
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            return Ok(());
        }
    }
    println!("{}", tr.t(keys::SETTINGS_SAVED));
    Ok(())
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).map_err(AppError::Io)?;
    Ok(buf)
}

fn read_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn read_optional_f64(tr: &Translator, prompt: &str) -> Result<Option<f64>, AppError> {
    loop {
        let s = read_line(prompt)?;
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        match trimmed.parse::<f64>() {
            Ok(v) => return Ok(Some(v)),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim(), "y" | "Y" | "yes" | "YES" | "是")
}
