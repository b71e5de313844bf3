//! End-to-end tests of the `qadapt` binary.

use std::process::{Command, Output};

use qadapt_vqe::RunConfig;

fn qadapt(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_qadapt"))
        .args(args)
        .env_remove("QADAPT_CONFIG")
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to launch qadapt")
}

// ============================================================================
// Config
// ============================================================================

mod config_tests {
    use super::*;

    #[test]
    fn test_default_config_round_trips() {
        let out = qadapt(&["config"]);
        assert!(out.status.success());
        let yaml = String::from_utf8(out.stdout).unwrap();
        assert_eq!(RunConfig::from_yaml(&yaml).unwrap(), RunConfig::default());
    }

    #[test]
    fn test_config_written_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.yaml");
        let out = qadapt(&["config", "--output", path.to_str().unwrap()]);
        assert!(out.status.success());
        assert_eq!(RunConfig::from_file(&path).unwrap(), RunConfig::default());
    }
}

// ============================================================================
// Excitations
// ============================================================================

mod excitations_tests {
    use super::*;

    #[test]
    fn test_h3_plus_pool() {
        let out = qadapt(&["excitations", "-e", "2", "-q", "6"]);
        assert!(out.status.success());
        let text = String::from_utf8(out.stdout).unwrap();
        assert!(text.contains("Singles (4)"));
        assert!(text.contains("Doubles (4)"));
        assert!(text.contains("D[0, 1, 2, 3]"));
    }

    #[test]
    fn test_too_many_electrons_fails() {
        let out = qadapt(&["excitations", "-e", "8", "-q", "4"]);
        assert!(!out.status.success());
        assert!(String::from_utf8_lossy(&out.stderr).contains("Error:"));
    }
}

// ============================================================================
// Run
// ============================================================================

mod run_tests {
    use super::*;

    #[test]
    fn test_h2_run_exports_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let out = qadapt(&[
            "run",
            "--molecule",
            "h2",
            "--export",
            path.to_str().unwrap(),
        ]);
        assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(json["timestamp"].is_string());
        assert_eq!(json["report"]["molecule"]["n_qubits"], 4);
        let history = json["report"]["two_stage"]["final_opt"]["history"]
            .as_array()
            .unwrap();
        assert_eq!(history.len(), 10);
        let energy = json["report"]["two_stage"]["final_opt"]["energy"]
            .as_f64()
            .unwrap();
        assert!((energy + 1.137274).abs() < 1e-5);
    }

    #[test]
    fn test_missing_config_fails() {
        let out = qadapt(&["run", "--config", "/nonexistent/qadapt.yaml"]);
        assert!(!out.status.success());
        assert!(String::from_utf8_lossy(&out.stderr).contains("Failed to load config"));
    }

    #[test]
    fn test_invalid_threshold_fails() {
        let out = qadapt(&["run", "--threshold", "0", "--no-exact"]);
        assert!(!out.status.success());
    }
}
