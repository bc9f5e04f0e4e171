use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 字符串键的命名空间。
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const PROMPT_PARAM_WITH_DEFAULT: &str = "prompt.param_with_default";
    pub const PROMPT_PARAM_OPTIONAL: &str = "prompt.param_optional";
    pub const PROMPT_LOCK_RESULT: &str = "prompt.lock_result";
    pub const PROMPT_EXPORT_REPORT: &str = "prompt.export_report";

    pub const RESULT_HEADING: &str = "result.heading";
    pub const RESULT_INTERMEDIATE: &str = "result.intermediate";
    pub const RESULT_PENDING_DP: &str = "result.pending_dp";

    pub const LOCKED_VC_SET: &str = "locked.set";
    pub const LOCKED_VC_COMPARE: &str = "locked.compare";
    pub const ANIMATION_LABEL: &str = "animation.label";

    pub const EXPORT_DONE: &str = "export.done";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_CURRENT_EXPORT_DIR: &str = "settings.current_export_dir";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_PROMPT_LANGUAGE: &str = "settings.prompt_language";
    pub const SETTINGS_PROMPT_EXPORT_DIR: &str = "settings.prompt_export_dir";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Zh,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else {
            Language::Zh
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Zh => "zh",
            Language::En => "en",
        }
    }
}

/// 提供运行时语言包。
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 按语言代码（zh/en）创建翻译器，未知代码回退到 zh。
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 按语言代码 + 语言包目录（locales/ 等）创建翻译器。
    /// 目录或文件不存在时仅使用内置字符串。
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code))
            .or_else(|| built_in_pack(lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 查询键对应的字符串，语言包里没有则为 None。
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 取翻译。英文缺失时回退到中文字符串。
    pub fn t(&self, key: &str) -> &'static str {
        if let Some(ref map) = self.overrides {
            if let Some(v) = map.get(key) {
                return Box::leak(v.clone().into_boxed_str());
            }
        }
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| zh(key)),
            Language::Zh => zh(key),
        }
    }

    /// 取翻译，键不存在时返回给定默认值。公式、分组等目录数据用此方法。
    pub fn text_or(&self, key: &str, default: &'static str) -> &'static str {
        if let Some(ref map) = self.overrides {
            if let Some(v) = map.get(key) {
                return Box::leak(v.clone().into_boxed_str());
            }
        }
        match self.lang {
            Language::En => en(key).or_else(|| zh_opt(key)).unwrap_or(default),
            Language::Zh => zh_opt(key).unwrap_or(default),
        }
    }
}

/// 按 CLI 参数、配置、系统区域的顺序决定语言代码。
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "zh-cn".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "zh" => Some("zh".into()),
        "zh-cn" => Some("zh-cn".into()),
        "en" => Some("en".into()),
        "en-us" => Some("en-us".into()),
        "en-uk" => Some("en-us".into()),
        "auto" | "" => None,
        other if other.starts_with("zh") => Some("zh-cn".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "zh" => Some("zh".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 从系统区域推断语言。
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    if let Ok(lang) = std::env::var("LANG") {
        if let Some(code) = normalize_locale_string(&lang) {
            return Some(code);
        }
    }
    if let Ok(lang) = std::env::var("LC_ALL") {
        if let Some(code) = normalize_locale_string(&lang) {
            return Some(code);
        }
    }
    None
}

/// 加载 TOML 语言包。格式为 key = "value" 的平铺映射。
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) 完整代码（如 zh-cn）
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) 基础代码（如 zh）
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// 内置语言包（无文件时也能工作，构建时嵌入）。
fn built_in_pack(lang: &str) -> Option<HashMap<String, String>> {
    match lang.to_lowercase().as_str() {
        "zh-cn" | "zh" => parse_toml_to_map(include_str!("../locales/zh-cn.toml")),
        "en-us" | "en" => parse_toml_to_map(include_str!("../locales/en-us.toml")),
        _ => None,
    }
}

fn zh(key: &str) -> &'static str {
    zh_opt(key).unwrap_or("[missing translation]")
}

fn zh_opt(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "错误",
        APP_EXIT => "程序已退出。",
        MAIN_MENU_TITLE => "\n=== 浆体管道计算工具 ===",
        MAIN_MENU_SETTINGS => "设置",
        MAIN_MENU_EXIT => "退出",
        PROMPT_MENU_SELECT => "菜单选择: ",
        INVALID_SELECTION_RETRY => "输入无效，请重新选择。",
        ERROR_INVALID_NUMBER => "请输入数字。",
        PROMPT_PARAM_WITH_DEFAULT => "（回车使用默认值）",
        PROMPT_PARAM_OPTIONAL => "（可选，回车跳过）",
        PROMPT_LOCK_RESULT => "是否锁定该临界流速用于流态对比？(y/N): ",
        PROMPT_EXPORT_REPORT => "是否导出计算书？(y/N): ",
        RESULT_HEADING => "\n-- 计算结果 --",
        RESULT_INTERMEDIATE => "中间计算结果:",
        RESULT_PENDING_DP => "未提供 dp，已完成矿浆流量计算，补充粒径后可求临界流速。",
        LOCKED_VC_SET => "已锁定临界流速:",
        LOCKED_VC_COMPARE => "与锁定临界流速之比 Vc/Vc₀ =",
        ANIMATION_LABEL => "流态演示:",
        EXPORT_DONE => "计算书已导出:",
        SETTINGS_HEADING => "\n-- 设置 --",
        SETTINGS_CURRENT_LANGUAGE => "当前语言:",
        SETTINGS_CURRENT_EXPORT_DIR => "当前导出目录:",
        SETTINGS_OPTIONS => "1) 切换语言  2) 修改导出目录",
        SETTINGS_PROMPT_CHANGE => "选择要修改的项（回车取消）: ",
        SETTINGS_PROMPT_LANGUAGE => "语言代码 (zh-cn/en-us): ",
        SETTINGS_PROMPT_EXPORT_DIR => "导出目录: ",
        SETTINGS_INVALID => "输入无效，设置未修改。",
        SETTINGS_SAVED => "设置已保存。",
        _ => return None,
    })
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== Slurry Pipeline Toolbox ===",
        MAIN_MENU_SETTINGS => "Settings",
        MAIN_MENU_EXIT => "Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        PROMPT_PARAM_WITH_DEFAULT => " (enter for default)",
        PROMPT_PARAM_OPTIONAL => " (optional, enter to skip)",
        PROMPT_LOCK_RESULT => "Lock this critical velocity for flow comparison? (y/N): ",
        PROMPT_EXPORT_REPORT => "Export calculation report? (y/N): ",
        RESULT_HEADING => "\n-- Results --",
        RESULT_INTERMEDIATE => "Intermediate results:",
        RESULT_PENDING_DP => {
            "dp not given; slurry flow computed, add particle size to solve critical velocity."
        }
        LOCKED_VC_SET => "Critical velocity locked:",
        LOCKED_VC_COMPARE => "Ratio to locked Vc (Vc/Vc₀) =",
        ANIMATION_LABEL => "Flow state:",
        EXPORT_DONE => "Report exported:",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language:",
        SETTINGS_CURRENT_EXPORT_DIR => "Current export directory:",
        SETTINGS_OPTIONS => "1) Switch language  2) Change export directory",
        SETTINGS_PROMPT_CHANGE => "Enter number to change (enter to cancel): ",
        SETTINGS_PROMPT_LANGUAGE => "Language code (zh-cn/en-us): ",
        SETTINGS_PROMPT_EXPORT_DIR => "Export directory: ",
        SETTINGS_INVALID => "Invalid input; settings unchanged.",
        SETTINGS_SAVED => "Settings saved.",
        _ => return None,
    })
}
