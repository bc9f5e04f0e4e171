use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Local;

use crate::catalog::FormulaSpec;
use crate::engine::{CalcRecord, FormulaId, ParamSet, PrimaryResult, TermValue};

/// 计算书结果栏的固定备注。
const RESULT_REMARK: &str = "计算结果仅供参考，实际应用需结合工程实际情况进行验证。";

/// 当日导出序号，跨日自动归零。进程级状态，导出时加锁递增。
static EXPORT_SEQUENCE: Mutex<Option<(String, u32)>> = Mutex::new(None);

/// 报告写出时可能出现的错误。
#[derive(Debug)]
pub enum ReportError {
    /// 文件写入失败
    Io(std::io::Error),
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::Io(e) => write!(f, "计算书写入失败: {e}"),
        }
    }
}

impl std::error::Error for ReportError {}

impl From<std::io::Error> for ReportError {
    fn from(value: std::io::Error) -> Self {
        ReportError::Io(value)
    }
}

/// 写出计算书文件并返回完整路径。
/// 文件名含公式名、日期和当日序号，同日多次导出不互相覆盖。
pub fn export(
    dir: &Path,
    spec: &FormulaSpec,
    params: &ParamSet,
    record: &CalcRecord,
) -> Result<PathBuf, ReportError> {
    let body = render(spec, params, record);
    fs::create_dir_all(dir)?;

    let date_key = Local::now().format("%Y%m%d").to_string();
    let sequence = next_sequence(&date_key);
    let name = spec.name.replace(' ', "").replace('/', "_");
    let filename = format!("浆体计算_{name}_{date_key}_{sequence:02}.md");
    let path = dir.join(filename);
    fs::write(&path, body)?;
    Ok(path)
}

fn next_sequence(date_key: &str) -> u32 {
    let mut guard = match EXPORT_SEQUENCE.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    match guard.as_mut() {
        Some((day, seq)) if day == date_key => {
            *seq += 1;
            *seq
        }
        _ => {
            *guard = Some((date_key.to_string(), 1));
            1
        }
    }
}

/// 组装计算书正文。
pub fn render(spec: &FormulaSpec, params: &ParamSet, record: &CalcRecord) -> String {
    let mut out = String::new();
    out.push_str("# 浆体管道临界流速计算书\n\n");
    out.push_str("本计算书由浆体管道计算工具自动生成，用于浆体管道输送系统的设计校核。\n\n");

    out.push_str("## 一、基本信息\n\n");
    out.push_str("| 项目 | 内容 |\n| --- | --- |\n");
    out.push_str(&format!("| 计算公式 | {} |\n", spec.name));
    out.push_str(&format!(
        "| 计算时间 | {} |\n\n",
        Local::now().format("%Y年%m月%d日 %H:%M:%S")
    ));

    out.push_str("## 二、使用的计算公式\n\n");
    out.push_str(&format!("公式名称：{}\n\n", spec.name));
    out.push_str(&format!("{}\n\n", spec.formula));
    if !spec.description.is_empty() {
        out.push_str(&format!("{}\n\n", spec.description));
    }

    out.push_str("## 三、输入参数\n\n");
    push_parameter_table(&mut out, spec, params);

    if !record.intermediate.is_empty() {
        out.push_str("## 四、中间计算结果\n\n");
        out.push_str("| 中间计算项 | 计算结果 |\n| --- | --- |\n");
        for term in &record.intermediate {
            let value = match &term.value {
                TermValue::Number(v) => format_intermediate(*v),
                TermValue::Text(text) => (*text).to_string(),
            };
            out.push_str(&format!("| {} | {} |\n", intermediate_label(term.key), value));
        }
        out.push('\n');
    }

    out.push_str("## 五、最终计算结果\n\n");
    out.push_str("| 项目 | 结果 |\n| --- | --- |\n");
    out.push_str(&format!(
        "| {} | {} |\n",
        primary_label(&record.primary),
        primary_display(record)
    ));
    out.push_str(&format!("| 备注 | {RESULT_REMARK} |\n\n"));

    out.push_str("## 六、详细计算过程\n\n");
    for (index, step) in process_steps(params, record).iter().enumerate() {
        out.push_str(&format!("{}. {}\n", index + 1, step));
    }
    out.push('\n');

    out.push_str("---\n\n计算完成，本计算书可直接归档或插入设计文件。\n");
    out
}

fn push_parameter_table(out: &mut String, spec: &FormulaSpec, params: &ParamSet) {
    // 默认重力加速度不进入参数表
    let visible =
        |key: &str, value: f64| -> bool { key != "g" || value != crate::engine::GRAVITY_DEFAULT };

    let mut rows = Vec::new();
    for param in spec.params {
        if let Some(value) = params.get(param.key) {
            if visible(param.key, value) {
                rows.push((param.label, format_param(value), param.unit));
            }
        }
    }
    for (key, value) in params.iter() {
        if spec.params.iter().all(|p| p.key != key) && visible(key, value) {
            rows.push((key, format_param(value), ""));
        }
    }

    if rows.is_empty() {
        out.push_str("无输入参数\n\n");
        return;
    }
    out.push_str("| 参数名称 | 数值 | 单位 |\n| --- | --- | --- |\n");
    for (label, value, unit) in rows {
        out.push_str(&format!("| {label} | {value} | {unit} |\n"));
    }
    out.push('\n');
}

/// 值格式遵循既有计算书习惯：参数六位小数去尾零，中间量按量级分档。
fn trim_fixed(value: f64, decimals: usize) -> String {
    let text = format!("{value:.decimals$}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

fn format_param(value: f64) -> String {
    trim_fixed(value, 6)
}

fn format_intermediate(value: f64) -> String {
    if value.abs() < 0.001 {
        format!("{value:.6e}")
    } else if value.abs() < 1.0 {
        trim_fixed(value, 6)
    } else {
        trim_fixed(value, 4)
    }
}

/// 主结果的界面标签。
pub fn primary_label(primary: &PrimaryResult) -> &'static str {
    match primary {
        PrimaryResult::CriticalVelocity(_) => "临界流速 Vc",
        PrimaryResult::HeadLoss(_) => "沿程摩阻损失 i_k",
        PrimaryResult::SlurryDensity(_) => "矿浆密度 ρ_k",
        PrimaryResult::FrictionFactor(_) => "达西摩阻系数 λ",
        PrimaryResult::ConditionMet(_) => "消能条件判别",
    }
}

/// 主结果的显示文本，数值带单位，判别类结果转为结论语句。
pub fn primary_display(record: &CalcRecord) -> String {
    match record.primary {
        PrimaryResult::CriticalVelocity(None) => "待定（未提供 dp，仅完成流量步）".to_string(),
        PrimaryResult::ConditionMet(true) => "成立，总水头差大于摩阻损失".to_string(),
        PrimaryResult::ConditionMet(false) => "不成立，总水头差不大于摩阻损失".to_string(),
        _ => {
            let text = trim_fixed(record.primary.number().unwrap_or_default(), 4);
            if record.unit.is_empty() {
                text
            } else {
                format!("{text} {}", record.unit)
            }
        }
    }
}

/// 中间计算项的界面标签。key 名是引擎的稳定契约。
pub fn intermediate_label(key: &str) -> &str {
    match key {
        "delta_rho_ratio" => "相对密度差",
        "core_term" | "bracket_term" => "核心项",
        "concentration_term" | "conc_term" => "浓度修正项",
        "velocity_ratio_term" => "速度比修正项",
        "size_ratio_term" | "size_term" => "粒径比修正项",
        "leading_coef" => "核心系数",
        "coefficient" | "coefficient_2_26" => "经验系数",
        "lambda_coef" => "λ系数",
        "g" => "重力加速度",
        "step_A_Qk" => "矿浆流量 Qk",
        "step_B_DL_mm" => "临界管径 DL (mm)",
        "Cd" => "重量砂水比 Cd",
        "step_C_V_L" => "临界流速 V_L",
        "numerator" => "流速平方与浆体密度项",
        "denominator" => "重力与管径项",
        "denom" => "浓度与密度加权倒数项",
        "Re" => "雷诺数",
        "flow_regime" => "流态",
        "eps_D" => "相对粗糙度 ε/D",
        "head_diff" => "左侧总水头差",
        "friction_loss_total" => "右侧摩阻损失 iL",
        other => other,
    }
}

/// 详细计算过程，逐步列出当前公式的推导链。
fn process_steps(params: &ParamSet, record: &CalcRecord) -> Vec<String> {
    let p = |key: &str| params.get(key).unwrap_or_default();
    let t = |key: &str| {
        record
            .intermediate_number(key)
            .map(format_intermediate)
            .unwrap_or_else(|| "N/A".to_string())
    };
    let primary = || {
        record
            .primary
            .number()
            .map(format_param)
            .unwrap_or_else(|| "N/A".to_string())
    };

    match record.formula {
        FormulaId::LiuDezhong => vec![
            format!(
                "计算相对密度差：(ρg - ρk)/ρk = ({} - {})/{} = {}",
                format_param(p("rho_g")),
                format_param(p("rho_k")),
                format_param(p("rho_k")),
                t("delta_rho_ratio")
            ),
            format!("计算核心项：[g*D*(Δρ/ρ)*ω]^(1/3) = {}", t("core_term")),
            format!("计算浓度修正项：Cv^(1/6) = {}", t("concentration_term")),
            format!(
                "计算速度比修正项：(ω_s/ω)^(1/6) = {}",
                t("velocity_ratio_term")
            ),
            format!(
                "计算临界流速：Vc = {} × {} × {} × {} = {} m/s",
                t("coefficient"),
                t("core_term"),
                t("concentration_term"),
                t("velocity_ratio_term"),
                primary()
            ),
        ],
        FormulaId::Wasp => vec![
            format!(
                "计算相对密度差：(ρg - ρk)/ρk = ({} - {})/{} = {}",
                format_param(p("rho_g")),
                format_param(p("rho_k")),
                format_param(p("rho_k")),
                t("delta_rho_ratio")
            ),
            format!("计算核心项：[2*g*D*(Δρ/ρ)]^(1/2) = {}", t("bracket_term")),
            format!("计算浓度修正项：Cv^0.1858 = {}", t("concentration_term")),
            format!("计算粒径比修正项：(d85/D)^(1/6) = {}", t("size_ratio_term")),
            format!(
                "计算临界流速：Vc = {} × {} × {} × {} = {} m/s",
                t("coefficient"),
                t("concentration_term"),
                t("bracket_term"),
                t("size_ratio_term"),
                primary()
            ),
        ],
        FormulaId::FeiXiangjun => vec![
            format!(
                "计算相对密度差：(ρg - ρk)/ρk = ({} - {})/{} = {}",
                format_param(p("rho_g")),
                format_param(p("rho_k")),
                format_param(p("rho_k")),
                t("delta_rho_ratio")
            ),
            format!("计算核心项：[g*D*(Δρ/ρ)*ω]^(1/2) = {}", t("bracket_term")),
            format!("计算浓度修正项：Cv^0.25 = {}", t("conc_term")),
            format!("计算粒径比修正项：(d90/D)^(1/3) = {}", t("size_term")),
            format!(
                "计算核心系数：{}/√{} = {}",
                t("coefficient_2_26"),
                t("lambda_coef"),
                t("leading_coef")
            ),
            format!(
                "计算临界流速：Vc = {} × {} × {} × {} = {} m/s",
                t("leading_coef"),
                t("bracket_term"),
                t("conc_term"),
                t("size_term"),
                primary()
            ),
        ],
        FormulaId::KronodzePressure => {
            let mut steps = vec![
                format!(
                    "计算矿浆流量：Qk = K*W*(1/ρg + G/W) = {} m³/h",
                    t("step_A_Qk")
                ),
                format!("计算重量砂水比：Cd = (G/W)*100 = {}", t("Cd")),
            ];
            if record.intermediate_number("step_B_DL_mm").is_some() {
                steps.push(format!(
                    "按 dp = {} mm 分段反解临界管径：DL = {} mm",
                    format_param(p("dp")),
                    t("step_B_DL_mm")
                ));
                steps.push(format!(
                    "计算临界流速：V_L = 0.255*β*(1 + 2.48*Cd^(1/3)*DL^(1/4)) = {} m/s",
                    primary()
                ));
            } else {
                steps.push("未提供尾矿加权平均粒径 dp，临界管径与临界流速待后续计算。".to_string());
            }
            steps
        }
        FormulaId::FrictionLoss => vec![
            format!("计算分子项：V²*ρ_k = {}", t("numerator")),
            format!("计算分母项：2*g*D*ρ_s = {}", t("denominator")),
            format!(
                "计算沿程摩阻损失：i_k = λ × {} / {} = {} mH₂O/m",
                t("numerator"),
                t("denominator"),
                primary()
            ),
        ],
        FormulaId::DensityMixing => vec![
            format!(
                "计算加权倒数项：C_w/ρ_g + (1-C_w)/ρ_s = {}",
                t("denom")
            ),
            format!("计算矿浆密度：ρ_k = 1/{} = {} t/m³", t("denom"), primary()),
        ],
        FormulaId::DarcyFriction => {
            let regime = record.intermediate.iter().find_map(|term| match term.value {
                TermValue::Text(text) => Some(text),
                _ => None,
            });
            match regime {
                Some("层流") => vec![
                    format!("雷诺数 Re = {}，小于 2300，判为层流。", t("Re")),
                    format!("计算摩阻系数：λ = 64/Re = {}", primary()),
                ],
                _ => vec![
                    format!("雷诺数 Re = {}，不小于 2300，判为湍流。", t("Re")),
                    format!("计算相对粗糙度：ε/D = {}", t("eps_D")),
                    format!(
                        "计算摩阻系数：λ = 0.25/[log10(ε/(3.7*D) + 5.74/Re^0.9)]² = {}",
                        primary()
                    ),
                ],
            }
        }
        FormulaId::SlurryAccelEnergy => {
            let condition = matches!(record.primary, PrimaryResult::ConditionMet(true));
            vec![
                format!("计算左侧总水头差：(Z1+H1) - (Z2+H2) = {}", t("head_diff")),
                format!("计算右侧摩阻损失：i*L = {}", t("friction_loss_total")),
                if condition {
                    "总水头差大于摩阻损失，加速流条件成立，应设置消能设施。".to_string()
                } else {
                    "总水头差不大于摩阻损失，加速流条件不成立。".to_string()
                },
            ]
        }
    }
}
