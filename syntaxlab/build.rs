// build.rs - TOML-driven compile-time constant generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    input: InputLimits,
    syntax: SyntaxLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct InputLimits {
    max_input_length: usize,
}

#[derive(serde::Deserialize)]
struct SyntaxLimits {
    max_parse_depth: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    max_log_message_length: usize,
    security_min_log_level: u8,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=SYNTAXLAB_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=SYNTAXLAB_CONFIG_DIR");

    let profile =
        env::var("SYNTAXLAB_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("SYNTAXLAB_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Config lives at the workspace root, one level above this crate
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_limits(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_limits(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_INPUT_LENGTH: usize = 64 * 1024 * 1024;
    const ABSOLUTE_MAX_PARSE_DEPTH: usize = 10_000;

    if config.input.max_input_length == 0 {
        panic!("LIMITS: max_input_length must be positive");
    }

    if config.input.max_input_length > ABSOLUTE_MAX_INPUT_LENGTH {
        panic!("LIMITS: max_input_length exceeds absolute maximum");
    }

    if config.syntax.max_parse_depth == 0 || config.syntax.max_parse_depth > ABSOLUTE_MAX_PARSE_DEPTH
    {
        panic!(
            "LIMITS: max_parse_depth must be within 1..={}",
            ABSOLUTE_MAX_PARSE_DEPTH
        );
    }

    if config.logging.max_log_message_length < 64 {
        panic!("LIMITS: max_log_message_length too small (min: 64)");
    }

    if config.logging.security_min_log_level > 2 {
        panic!("LIMITS: security_min_log_level too high (max: 2)");
    }

    if profile == "production" && config.input.max_input_length > 1024 * 1024 {
        panic!("PRODUCTION: max_input_length too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod input {{
        pub const MAX_INPUT_LENGTH: usize = {};
    }}

    pub mod syntax {{
        pub const MAX_PARSE_DEPTH: usize = {};
    }}

    pub mod logging {{
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
        pub const SECURITY_MIN_LOG_LEVEL: u8 = {};
    }}
}}
"#,
        profile,
        config.input.max_input_length,
        config.syntax.max_parse_depth,
        config.logging.max_log_message_length,
        config.logging.security_min_log_level,
    );

    fs::write(output_path, constants_code).unwrap();
}
