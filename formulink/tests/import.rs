//! End-to-end imports of the built-in formulary

use formulink::prelude::*;
use formulink::{import_all, import_list, DiagnosticKind, BridgeError, DIMENSIONLESS};
use formulink_core::{FunctionDescriptor, ParamDescriptor, SourceFunction, SourceModule, UnitAnnotation, TO_HZ};
use formulink_formulary::functions::parameters;
use formulink_formulary::Formulary;
use std::sync::Arc;

fn full_import() -> ImportReport {
    Importer::new(&Formulary::standard())
        .with_verbosity(Verbosity::Quiet)
        .import_all(None)
}

fn close(actual: &Value, expected: f64) -> bool {
    match actual {
        Value::Number(x) => ((x - expected) / expected).abs() < 1e-9,
        _ => false,
    }
}

#[test]
fn test_full_import_registers_every_single_valued_function() {
    let report = full_import();
    assert_eq!(report.registry.len(), 30);
    assert_eq!(report.imported.len(), 30);

    for key in [
        "ln_Lambda", "bPerp", "spitzer",
        "Re", "Rm", "theta", "beta_H",
        "Z", "Saha",
        "omega_p1", "omega_p2", "omega_c1", "omega_c2", "lambda_D", "V", "V_A", "rho", "V_S", "d", "p_B", "D_B",
        "lambda_dB", "lambda_dbTh", "energy_F", "lambda_TF", "radius",
        "G",
    ] {
        assert!(report.registry.contains_key(key), "{} missing", key);
    }
}

#[test]
fn test_reserved_names_take_counter_values_in_order() {
    let registry = full_import().registry;
    assert!(registry.contains_key("beta1"));
    assert!(registry.contains_key("gamma2"));
    assert!(registry.contains_key("E3"));
    for reserved in ["beta", "gamma", "E"] {
        assert!(!registry.contains_key(reserved));
    }
}

#[test]
fn test_skipped_functions_are_reported() {
    let report = full_import();
    let of_kind = |kind: DiagnosticKind| report.diagnostics.iter().filter(|d| d.kind == kind).collect::<Vec<_>>();

    let multi = of_kind(DiagnosticKind::MultiValue);
    assert_eq!(multi.len(), 1);
    assert_eq!(multi[0].subject, "collision_frequencies");

    let denied = of_kind(DiagnosticKind::Denied);
    assert_eq!(denied.len(), 1);
    assert_eq!(denied[0].subject, "impact_parameter");

    // allow-listed modules the built-in formulary does not have
    assert_eq!(of_kind(DiagnosticKind::ModuleMissing).len(), 7);
    assert!(of_kind(DiagnosticKind::InsertFailed).is_empty());
    assert!(!report.registry.keys().any(|k| k.starts_with("nu_") || k == "collision_frequencies"));
}

#[test]
fn test_aliases_are_not_imported_twice() {
    let registry = full_import().registry;
    assert!(!registry.keys().any(|k| k.ends_with('_')));
    assert!(!registry.contains_key("wp"));
}

#[test]
fn test_dual_mode_entries() {
    let registry = full_import().registry;
    for base in ["omega_p", "omega_c"] {
        let angular = registry.get(&format!("{}1", base)).unwrap();
        let hz = registry.get(&format!("{}2", base)).unwrap();
        assert_eq!(angular.meta().units, "radian/s");
        assert_eq!(hz.meta().units, "Hz");
        for entry in [angular, hz] {
            assert!(!entry.arg_names().contains(&TO_HZ));
            assert!(entry.meta().is_hidden(TO_HZ));
        }
        assert!(!registry.contains_key(base));
    }
}

#[test]
fn test_units_are_in_registry_grammar() {
    let registry = full_import().registry;
    for key in registry.keys() {
        let meta = registry.get(key).unwrap().meta();
        assert!(!meta.units.is_empty());
        assert!(!meta.units.contains(' '), "{}: {}", key, meta.units);
        for (arg, units) in &meta.arg_units {
            assert!(!units.contains(' '), "{}.{}: {}", key, arg, units);
            assert!(!units.contains("class") && !units.contains("typing"));
        }
        assert!(meta.citation.as_deref().is_some_and(|c| c.contains("PlasmaPy")));
    }
}

#[test]
fn test_resolved_units() {
    let registry = full_import().registry;
    let units = |key: &str| registry.get(key).unwrap().meta().clone();

    assert_eq!(units("lambda_D").units, "m");
    assert_eq!(units("D_B").units, "m**2/s");
    assert_eq!(units("spitzer").units, "m**3*kg/(A**2*s**3)");
    assert_eq!(units("Rm").arg_units["sigma"], "s**3*A**2/(kg*m**3)");
    assert_eq!(units("Re").arg_units["mu"], "kg/(m*s)");
    assert_eq!(units("Re").units, DIMENSIONLESS);
    assert_eq!(units("gamma2").units, DIMENSIONLESS);
    assert_eq!(units("ln_Lambda").units, DIMENSIONLESS);
    assert_eq!(units("omega_p1").arg_units["particle"], DIMENSIONLESS);
    assert_eq!(units("Saha").arg_units["g_j"], DIMENSIONLESS);
    assert_eq!(units("G").arg_units["x"], DIMENSIONLESS);
}

#[test]
fn test_density_union_resolves_per_function() {
    let registry = full_import().registry;
    assert_eq!(registry.get("rho").unwrap().meta().arg_units["density"], "1/m**3");
    assert_eq!(registry.get("V_A").unwrap().meta().arg_units["density"], "kg/m**3");
}

#[test]
fn test_imported_functions_return_bare_numbers() {
    let registry = full_import().registry;
    let electron = Value::from("e-");

    let wp = registry.call("omega_p1", &[Value::Number(1e19), electron.clone()]);
    assert!(close(&wp, 1.783986366e11), "{:?}", wp);
    let fp = registry.call("omega_p2", &[Value::Number(1e19), electron.clone()]);
    assert!(close(&fp, 2.839302486e10), "{:?}", fp);

    let wc = registry.call("omega_c1", &[Value::Number(0.1), electron]);
    assert!(close(&wc, 1.758820011e10), "{:?}", wc);

    let gamma = registry.call("gamma2", &[Value::Number(0.0)]);
    assert_eq!(gamma, Value::Number(1.0));
}

#[test]
fn test_dual_mode_entries_reject_the_hidden_flag() {
    let registry = full_import().registry;
    let v = registry.call("omega_p1", &[Value::Number(1e19), Value::from("e-"), Value::Bool(true)]);
    assert!(v.is_error());
}

#[test]
fn test_call_errors_surface_as_values() {
    let registry = full_import().registry;
    match registry.call("omega_p1", &[Value::Number(1e19), Value::from("muon")]) {
        Value::Error(e) => assert_eq!(e.code, codes::UNKNOWN_PARTICLE),
        other => panic!("expected an error, got {:?}", other),
    }
    assert!(registry.call("omega_p", &[]).is_error());
}

#[test]
fn test_selective_import() {
    let names = [
        "plasma.formulary.parameters.plasma_frequency",
        "plasma.formulary.parameters.Alfven_speed",
    ];
    let registry = import_list(&Formulary::standard(), &names, Verbosity::Quiet, None);
    let keys: Vec<&str> = registry.keys().collect();
    assert_eq!(keys, vec!["V_A", "omega_p1", "omega_p2"]);
}

#[test]
fn test_selective_import_outside_allow_list_changes_nothing() {
    let formulary = Formulary::standard();
    let before = import_list(&formulary, &["plasma.formulary.parameters.Debye_length"], Verbosity::Quiet, None);

    let report = Importer::new(&formulary)
        .with_verbosity(Verbosity::Quiet)
        .import_list(&["plasma.formulary.magnetostatics.MagneticDipole"], Some(before));

    assert!(report.imported.is_empty());
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].kind, DiagnosticKind::ModuleNotAllowed);
    assert_eq!(report.registry.keys().collect::<Vec<_>>(), vec!["lambda_D"]);
}

#[test]
fn test_selective_import_rejections() {
    let report = Importer::new(&Formulary::standard())
        .with_verbosity(Verbosity::Quiet)
        .import_list(&[
            "plasma.formulary.collisions.impact_parameter",
            "plasma.formulary.parameters.no_such_function",
            "plasma.formulary.drifts.ExB_drift",
            "Debye_length",
        ], None);

    let kinds: Vec<DiagnosticKind> = report.diagnostics.iter().map(|d| d.kind).collect();
    assert_eq!(kinds, vec![
        DiagnosticKind::Denied,
        DiagnosticKind::FunctionMissing,
        DiagnosticKind::ModuleMissing,
        DiagnosticKind::ModuleNotAllowed,
    ]);
    assert!(report.registry.is_empty());
}

#[test]
fn test_collisions_take_successive_counter_values() {
    let mut registry = Registry::new();
    registry
        .insert("rho", Arc::new(parameters::mass_density()), EntryMeta::new("kg/m**3"))
        .unwrap();

    let name = "plasma.formulary.parameters.mass_density";
    let report = Importer::new(&Formulary::standard())
        .with_verbosity(Verbosity::Quiet)
        .import_list(&[name, name], Some(registry));

    assert_eq!(report.imported, vec!["rho1", "rho2"]);
    assert_eq!(report.registry.len(), 3);
}

#[test]
fn test_extending_a_registry_avoids_its_keys() {
    let formulary = Formulary::standard();
    let first = import_all(&formulary, Verbosity::Quiet, None);
    let count = first.len();
    let report = Importer::new(&formulary)
        .with_verbosity(Verbosity::Quiet)
        .import_one("plasma.formulary.parameters.Debye_length", Some(first));

    assert_eq!(report.registry.len(), count + 1);
    assert_eq!(report.imported, vec!["lambda_D1"]);
}

#[test]
fn test_custom_configuration() {
    let config = BridgeConfig {
        modules: vec!["plasma.formulary.relativity".to_string()],
        deny: vec!["Lorentz_factor".to_string()],
        ..BridgeConfig::default()
    };
    let report = Importer::new(&Formulary::standard())
        .with_config(config)
        .with_verbosity(Verbosity::Quiet)
        .import_all(None);

    assert_eq!(report.imported, vec!["E1"]);
    assert_eq!(report.diagnostics.len(), 1);
}

fn furlongs() -> SourceFunction {
    let desc = FunctionDescriptor::new("stadium_length")
        .param(ParamDescriptor::required("laps", UnitAnnotation::unit("")))
        .returns(UnitAnnotation::unit("N furlong"));
    SourceFunction::new(desc, |a| Ok(Value::Number(a[0].as_f64().unwrap_or(0.0))))
}

fn no_args() -> SourceFunction {
    let desc = FunctionDescriptor::new("unity").returns(UnitAnnotation::unit(""));
    SourceFunction::new(desc, |_| Ok(Value::Number(1.0)))
}

#[test]
fn test_insertion_failure_is_a_diagnostic() {
    let formulary = Formulary::new().with_module(
        SourceModule::new("plasma.formulary.drifts")
            .with_function(furlongs())
            .with_function(no_args()),
    );
    let report = Importer::new(&formulary)
        .with_verbosity(Verbosity::Quiet)
        .import_list(&["plasma.formulary.drifts.stadium_length", "plasma.formulary.drifts.unity"], None);

    assert_eq!(report.imported, vec!["unity"]);
    let failed = report.diagnostics.iter().find(|d| d.kind == DiagnosticKind::InsertFailed).unwrap();
    assert_eq!(failed.subject, "stadium_length");
    assert!(failed.message.contains("N*furlong"));
    assert!(failed.message.contains("laps"));

    let empty = report.diagnostics.iter().find(|d| d.kind == DiagnosticKind::NoArgUnits).unwrap();
    assert_eq!(empty.subject, "unity");
    assert_eq!(report.skipped(), 1);
}

#[test]
fn test_multi_value_error_names_the_values() {
    let report = Importer::new(&Formulary::standard())
        .with_verbosity(Verbosity::Quiet)
        .import_one("plasma.formulary.collisions.collision_frequencies", None);
    let d = &report.diagnostics[0];
    assert_eq!(d.kind, DiagnosticKind::MultiValue);
    let expected = BridgeError::MultiValue {
        function: "collision_frequencies".to_string(),
        returns: "nu_a,nu_b".to_string(),
    };
    assert_eq!(d.message, expected.to_string());
}
