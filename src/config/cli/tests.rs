//! Tests for CLI argument parsing

use super::*;
use crate::config::PipelineConfig;
use proptest::prelude::*;
use std::path::PathBuf;

#[test]
fn test_parse_generate_command() {
    let cli = parse_args(["sinetab", "generate", "--samples", "300"]).unwrap();
    match cli.command {
        Command::Generate(args) => {
            assert_eq!(args.bits, 8);
            assert_eq!(args.samples, 300);
            assert!(args.output.is_none());
            assert!(args.patch.is_empty());
            assert_eq!(args.format, OutputFormat::Text);
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn test_generate_requires_samples() {
    assert!(parse_args(["sinetab", "generate", "--bits", "8"]).is_err());
}

#[test]
fn test_parse_generate_with_outputs() {
    let cli = parse_args([
        "sinetab",
        "generate",
        "-b",
        "10",
        "-n",
        "500",
        "--output",
        "rtl/table.v",
        "--patch",
        "a.v",
        "--patch",
        "b.v",
        "--csv",
        "table.csv",
    ])
    .unwrap();
    match cli.command {
        Command::Generate(args) => {
            assert_eq!(args.bits, 10);
            assert_eq!(args.output, Some(PathBuf::from("rtl/table.v")));
            assert_eq!(args.patch, vec![PathBuf::from("a.v"), PathBuf::from("b.v")]);
            assert_eq!(args.csv, Some(PathBuf::from("table.csv")));
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn test_parse_optimize_with_search_overrides() {
    let cli = parse_args([
        "sinetab",
        "optimize",
        "--bits",
        "6",
        "--calls",
        "30",
        "--initial-points",
        "5",
        "--seed",
        "9",
        "--max",
        "200",
    ])
    .unwrap();
    match cli.command {
        Command::Optimize(args) => {
            assert_eq!(args.bits, Some(6));
            assert_eq!(args.search.budget.calls, Some(30));
            assert_eq!(args.search.budget.initial_points, Some(5));
            assert_eq!(args.search.budget.seed, Some(9));
            assert_eq!(args.search.max, Some(200));
            assert_eq!(args.search.min, None);
        }
        _ => panic!("Expected Optimize command"),
    }
}

#[test]
fn test_parse_sweep_budget_without_bounds() {
    let cli = parse_args(["sinetab", "sweep", "--calls", "20", "--seed", "3"]).unwrap();
    match cli.command {
        Command::Sweep(args) => {
            assert_eq!(args.budget.calls, Some(20));
            assert_eq!(args.budget.seed, Some(3));
            assert!(args.bits.is_empty());
        }
        _ => panic!("Expected Sweep command"),
    }
    assert!(parse_args(["sinetab", "sweep", "--min", "100"]).is_err());
    assert!(parse_args(["sinetab", "sweep", "--max", "900"]).is_err());
}

#[test]
fn test_parse_sweep_bit_list() {
    let cli = parse_args(["sinetab", "sweep", "--bits", "2,4,8", "--workers", "3"]).unwrap();
    match cli.command {
        Command::Sweep(args) => {
            assert_eq!(args.bits, vec![2, 4, 8]);
            assert_eq!(args.workers, Some(3));
        }
        _ => panic!("Expected Sweep command"),
    }
}

#[test]
fn test_parse_adc_defaults() {
    let cli = parse_args(["sinetab", "adc"]).unwrap();
    match cli.command {
        Command::Adc(args) => {
            assert_eq!(args.data_width, 12);
            assert_eq!(args.buffer_size, 4096);
            assert_eq!(args.samples, 1024);
            assert!(args.simulate.is_none());
        }
        _ => panic!("Expected Adc command"),
    }
}

#[test]
fn test_parse_run_and_validate() {
    let cli = parse_args(["sinetab", "run", "pipeline.yaml", "--dry-run"]).unwrap();
    match cli.command {
        Command::Run(args) => {
            assert_eq!(args.config, PathBuf::from("pipeline.yaml"));
            assert!(args.dry_run);
        }
        _ => panic!("Expected Run command"),
    }

    let cli = parse_args(["sinetab", "validate", "pipeline.yaml", "--detailed"]).unwrap();
    match cli.command {
        Command::Validate(args) => assert!(args.detailed),
        _ => panic!("Expected Validate command"),
    }
}

#[test]
fn test_global_flags() {
    let cli = parse_args(["sinetab", "-v", "validate", "p.yaml"]).unwrap();
    assert!(cli.verbose && !cli.quiet);
    let cli = parse_args(["sinetab", "validate", "p.yaml", "--quiet"]).unwrap();
    assert!(!cli.verbose && cli.quiet);
}

#[test]
fn test_unknown_command() {
    assert!(parse_args(["sinetab", "unknown"]).is_err());
}

#[test]
fn test_apply_overrides() {
    let mut config = PipelineConfig::default();
    let cli = parse_args([
        "sinetab", "run", "p.yaml", "--bits", "12", "--samples", "700", "--seed", "3", "--min",
        "300",
    ])
    .unwrap();
    let Command::Run(args) = cli.command else {
        panic!("Expected Run command");
    };
    apply_overrides(&mut config, &args);
    assert_eq!(config.table.bit_width, 12);
    assert_eq!(config.table.sample_count, Some(700));
    assert_eq!(config.search.seed, 3);
    assert_eq!(config.search.min, Some(300));
    assert_eq!(config.search.max, None);
    assert_eq!(config.search.total_calls, 50);
}

#[test]
fn test_output_format_parse() {
    assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
    assert_eq!("yml".parse::<OutputFormat>(), Ok(OutputFormat::Yaml));
    assert!("xml".parse::<OutputFormat>().is_err());
    assert_eq!(OutputFormat::Text.to_string(), "text");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_generate_parses(bits in 1u32..=32, samples in 4u64..100_000) {
        let bits_str = bits.to_string();
        let samples_str = samples.to_string();
        let cli = parse_args(["sinetab", "generate", "--bits", &bits_str, "--samples", &samples_str]);
        prop_assert!(cli.is_ok());
        match cli.unwrap().command {
            Command::Generate(args) => {
                prop_assert_eq!(args.bits, bits);
                prop_assert_eq!(args.samples, samples);
            }
            _ => prop_assert!(false, "Expected Generate command"),
        }
    }

    #[test]
    fn prop_seed_override(seed in any::<u64>()) {
        let seed_str = seed.to_string();
        let cli = parse_args(["sinetab", "optimize", "--seed", &seed_str]).unwrap();
        match cli.command {
            Command::Optimize(args) => prop_assert_eq!(args.search.budget.seed, Some(seed)),
            _ => prop_assert!(false, "Expected Optimize command"),
        }
    }
}
