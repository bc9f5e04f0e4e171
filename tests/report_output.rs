//! 计算书渲染与导出测试。
use std::fs;

use slurry_pipeline_toolbox::catalog;
use slurry_pipeline_toolbox::engine::{self, FormulaId, ParamSet};
use slurry_pipeline_toolbox::report;

fn liu_params() -> ParamSet {
    ParamSet::new()
        .with("D", 0.5)
        .with("rho_g", 2650.0)
        .with("rho_k", 1000.0)
        .with("omega", 0.02)
        .with("Cv", 0.15)
        .with("omega_s", 0.018)
        .with("g", 9.81)
}

#[test]
fn render_contains_all_sections() {
    let params = liu_params();
    let record = engine::evaluate(FormulaId::LiuDezhong, &params).expect("liu");
    let spec = catalog::find(FormulaId::LiuDezhong);
    let body = report::render(spec, &params, &record);

    assert!(body.contains("# 浆体管道临界流速计算书"));
    assert!(body.contains("## 一、基本信息"));
    assert!(body.contains("| 计算公式 | 刘德忠公式 |"));
    assert!(body.contains("## 二、使用的计算公式"));
    assert!(body.contains("Vc = 9.5 * [g*D*(Δρ/ρ)*ω]^(1/3)"));
    assert!(body.contains("## 三、输入参数"));
    assert!(body.contains("| 管道内径 | 0.5 | m |"));
    assert!(body.contains("| 固体颗粒密度 | 2650 | kg/m³ |"));
    assert!(body.contains("## 四、中间计算结果"));
    assert!(body.contains("| 相对密度差 | 1.65 |"));
    assert!(body.contains("| 核心项 | 0.544985 |"));
    assert!(body.contains("## 五、最终计算结果"));
    assert!(body.contains("| 临界流速 Vc | 3.7082 m/s |"));
    assert!(body.contains("计算结果仅供参考，实际应用需结合工程实际情况进行验证。"));
    assert!(body.contains("## 六、详细计算过程"));
    assert!(body.contains("计算临界流速"));
}

#[test]
fn render_hides_default_gravity_parameter_row() {
    let params = liu_params();
    let record = engine::evaluate(FormulaId::LiuDezhong, &params).expect("liu");
    let spec = catalog::find(FormulaId::LiuDezhong);
    let body = report::render(spec, &params, &record);

    // 取默认值 9.81 的 g 不进入参数表，但中间结果仍然展示
    assert!(!body.contains("| 重力加速度 | 9.81 | m/s² |"));
    assert!(body.contains("| 重力加速度 | 9.81 |"));

    let params = liu_params().with("g", 9.78);
    let record = engine::evaluate(FormulaId::LiuDezhong, &params).expect("liu custom g");
    let body = report::render(spec, &params, &record);
    assert!(body.contains("| 重力加速度 | 9.78 | m/s² |"));
}

#[test]
fn render_covers_pending_kronodze_stage() {
    let params = ParamSet::new()
        .with("G", 100.0)
        .with("W", 400.0)
        .with("rho_g", 2.7);
    let record = engine::evaluate(FormulaId::KronodzePressure, &params).expect("stage A");
    let spec = catalog::find(FormulaId::KronodzePressure);
    let body = report::render(spec, &params, &record);

    assert!(body.contains("| 矿浆流量 Qk | 272.963 |"));
    assert!(body.contains("待定"));
    assert!(body.contains("未提供尾矿加权平均粒径 dp"));
}

#[test]
fn render_names_flow_regime_in_process() {
    let params = ParamSet::new().with("Re", 2000.0);
    let record = engine::evaluate(FormulaId::DarcyFriction, &params).expect("laminar");
    let spec = catalog::find(FormulaId::DarcyFriction);
    let body = report::render(spec, &params, &record);

    assert!(body.contains("| 流态 | 层流 |"));
    assert!(body.contains("判为层流"));
    assert!(body.contains("λ = 64/Re"));
}

#[test]
fn export_writes_sequenced_files() {
    let dir = std::env::temp_dir().join(format!("slurry_report_test_{}", std::process::id()));
    let params = liu_params();
    let record = engine::evaluate(FormulaId::LiuDezhong, &params).expect("liu");
    let spec = catalog::find(FormulaId::LiuDezhong);

    let first = report::export(&dir, spec, &params, &record).expect("first export");
    let second = report::export(&dir, spec, &params, &record).expect("second export");

    assert_ne!(first, second);
    for path in [&first, &second] {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .expect("file name");
        assert!(name.starts_with("浆体计算_刘德忠公式_"), "name: {name}");
        assert!(name.ends_with(".md"), "name: {name}");
        // 序号恒为两位数字
        let digits = &name[name.len() - 6..name.len() - 3];
        assert!(
            digits.starts_with('_') && digits[1..].chars().all(|c| c.is_ascii_digit()),
            "name: {name}"
        );
        let body = fs::read_to_string(path).expect("read back");
        assert!(body.contains("## 五、最终计算结果"));
    }
    let first_name = first.file_name().and_then(|n| n.to_str()).expect("name");
    assert!(first_name.ends_with("_01.md"), "name: {first_name}");

    let _ = fs::remove_dir_all(&dir);
}
