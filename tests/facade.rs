mod common;

use std::sync::{Arc, Barrier};
use std::thread;

use approx::assert_relative_eq;
use common::{Call, MockEngine};
use coolprop_calc::{CalcError, Calculator, CellValue, Units};

fn number(v: &CellValue) -> f64 {
    v.as_number()
        .unwrap_or_else(|| panic!("expected a number, got {v:?}"))
}

fn error_text(v: &CellValue) -> &str {
    assert!(v.is_error(), "expected an error string, got {v:?}");
    v.as_text().unwrap()
}

// ═══════════════════════════════════════════════════════════════════
//  Argument validation
// ═══════════════════════════════════════════════════════════════════

#[test]
fn missing_names_are_reported_without_calling_the_engine() {
    let engine = MockEngine::returning(1.0);
    let calc = Calculator::new(engine.clone());

    let v = calc.cprop_si("", "T", 300.0, "P", 101325.0, "Water");
    assert_eq!(error_text(&v), "Error: Missing parameter (output)");

    let v = calc.cprop_e("H", CellValue::Empty, 25.0, "P", 1.0, "Water");
    assert_eq!(error_text(&v), "Error: Missing parameter (name1)");

    let v = calc.cprop("H", "T", 25.0, "P", 1.0, "   ");
    assert_eq!(error_text(&v), "Error: Missing parameter (fluid)");

    let v = calc.cpropha_si("W", "T", 300.0, "P", 101325.0, "", 0.5);
    assert_eq!(error_text(&v), "Error: Missing parameter (name3)");

    assert!(engine.calls().is_empty());
}

#[test]
fn non_numeric_values_are_reported() {
    let engine = MockEngine::returning(1.0);
    let calc = Calculator::new(engine.clone());

    let v = calc.cprop_e("H", "T", "hot", "P", 1.0, "Water");
    assert_eq!(error_text(&v), "Error: Non-numeric input (value1)");

    let v = calc.cpropha_e("W", "T", 25.0, "P", 1.01325, "RH", "half");
    assert_eq!(error_text(&v), "Error: Non-numeric input (value3)");

    let v = calc.cprop_si("H", "T", 300.0, "P", CellValue::Empty, "Water");
    assert_eq!(error_text(&v), "Error: Missing parameter (value2)");

    assert!(engine.calls().is_empty());
}

#[test]
fn number_in_a_name_slot_is_invalid_input() {
    let calc = Calculator::new(MockEngine::returning(1.0));
    let v = calc.cprop_si(42.0, "T", 300.0, "P", 101325.0, "Water");
    assert!(error_text(&v).starts_with("Error: Invalid input:"));
}

#[test]
fn names_are_trimmed() {
    let engine = MockEngine::returning(1.0);
    let calc = Calculator::new(engine.clone());
    calc.cprop_si(" h ", " t", 300.0, "p ", 101325.0, " Water ");
    assert_eq!(
        engine.last_call(),
        Call::Props {
            output: "H".into(),
            name1: "T".into(),
            value1: 300.0,
            name2: "P".into(),
            value2: 101325.0,
            fluid: "Water".into(),
        }
    );
}

#[test]
fn long_aliases_reach_the_engine_canonical() {
    let engine = MockEngine::returning(997.0);
    let calc = Calculator::new(engine.clone());
    let v = calc.cprop("rho", "temp", 25.0, "pressure", 1.0, "h2o");
    assert_relative_eq!(number(&v), 997.0);
    assert_eq!(
        engine.last_call(),
        Call::Props {
            output: "D".into(),
            name1: "T".into(),
            value1: 298.15,
            name2: "P".into(),
            value2: 1.0e5,
            fluid: "Water".into(),
        }
    );
}

// ═══════════════════════════════════════════════════════════════════
//  Real fluids
// ═══════════════════════════════════════════════════════════════════

#[test]
fn si_call_passes_values_through() {
    let engine = MockEngine::returning(104_920.0);
    let calc = Calculator::new(engine.clone());

    let v = calc.cprop_si("enthalpy", "temp", 298.15, "pressure", 1.0e5, "h2o");
    assert_relative_eq!(number(&v), 104_920.0);
    assert_eq!(
        engine.last_call(),
        Call::Props {
            output: "H".into(),
            name1: "T".into(),
            value1: 298.15,
            name2: "P".into(),
            value2: 1.0e5,
            fluid: "Water".into(),
        }
    );
}

#[test]
fn engineering_call_converts_inputs_and_result() {
    let engine = MockEngine::returning(104_920.0);
    let calc = Calculator::new(engine.clone());

    let v = calc.cprop_e("H", "T", 25.0, "P", 1.0, "Water");
    assert_relative_eq!(number(&v), 104.92, max_relative = 1e-12);

    let Call::Props { value1, value2, .. } = engine.last_call() else {
        panic!("expected a PropsSI call");
    };
    assert_relative_eq!(value1, 298.15, max_relative = 1e-12);
    assert_relative_eq!(value2, 1.0e5, max_relative = 1e-12);
}

#[test]
fn engineering_and_si_entry_points_agree() {
    // Enthalpy that grows with temperature and pressure, so any missed
    // conversion shows up in the result.
    let engine = MockEngine::responding(|call| match call {
        Call::Props { value1, value2, .. } => 4180.0 * (value1 - 273.15) + 1.0e-3 * value2,
        _ => f64::NAN,
    });
    let calc = Calculator::new(engine);

    let h_si = number(&calc.cprop_si("H", "T", 298.15, "P", 1.0e5, "Water"));
    let h_e = number(&calc.cprop_e("H", "T", 25.0, "P", 1.0, "Water"));
    assert_relative_eq!(h_e, h_si / 1000.0, max_relative = 1e-9);

    let t_si = number(&calc.cprop_si("T", "H", 104_920.0, "P", 1.0e5, "Water"));
    let t_e = number(&calc.cprop_e("T", "H", 104.92, "P", 1.0, "Water"));
    assert_relative_eq!(t_e, t_si - 273.15, max_relative = 1e-9);
}

#[test]
fn unconverted_outputs_are_returned_as_is() {
    let calc = Calculator::new(MockEngine::returning(997.05));
    let v = calc.cprop_e("rho", "T", 25.0, "P", 1.0, "Water");
    assert_relative_eq!(number(&v), 997.05);

    let calc = Calculator::new(MockEngine::returning(0.35));
    let v = calc.cprop_e("Q", "P", 1.0, "H", 1500.0, "Water");
    assert_relative_eq!(number(&v), 0.35);
}

#[test]
fn default_variant_matches_engineering_variant() {
    let engine = MockEngine::responding(|call| match call {
        Call::Props { value1, value2, .. } => value1 * 3.0 + value2,
        Call::HaProps { value1, value2, value3, .. } => value1 + value2 * value3,
        _ => f64::NAN,
    });
    let calc = Calculator::new(engine);

    for args in [("H", "T", 25.0, "P", 1.0, "Water"), ("S", "P", 3.0, "Q", 1.0, "R134a")] {
        let (o, n1, v1, n2, v2, f) = args;
        assert_eq!(calc.cprop(o, n1, v1, n2, v2, f), calc.cprop_e(o, n1, v1, n2, v2, f));
    }
    assert_eq!(
        calc.cpropha("Hha", "T", 25.0, "P", 1.01325, "RH", 0.5),
        calc.cpropha_e("Hha", "T", 25.0, "P", 1.01325, "RH", 0.5),
    );
    // Error strings are delegated too.
    assert_eq!(
        calc.cprop("H", "T", "x", "P", 1.0, "Water"),
        calc.cprop_e("H", "T", "x", "P", 1.0, "Water"),
    );
}

#[test]
fn mixture_fluid_strings_reach_the_engine_untouched() {
    let engine = MockEngine::returning(1.0);
    let calc = Calculator::new(engine.clone());
    let mix = "HEOS::R32[0.697615]&R125[0.302385]";
    calc.cprop_si("D", "T", 300.0, "P", 1.0e6, mix);
    let Call::Props { fluid, .. } = engine.last_call() else {
        panic!("expected a PropsSI call");
    };
    assert_eq!(fluid, mix);
}

// ═══════════════════════════════════════════════════════════════════
//  Engine failures
// ═══════════════════════════════════════════════════════════════════

#[test]
fn sentinels_become_error_strings() {
    for sentinel in [1.0e308, -1.0e308, f64::INFINITY, f64::NAN] {
        let calc = Calculator::new(
            MockEngine::returning(sentinel).last_error("Input pair variable is invalid"),
        );
        for v in [
            calc.cprop_si("H", "T", 300.0, "P", 1.0e5, "Water"),
            calc.cprop_e("H", "T", 25.0, "P", 1.0, "Water"),
            calc.cpropha_si("W", "T", 300.0, "P", 101325.0, "R", 0.5),
            calc.cpropha("W", "T", 25.0, "P", 1.01325, "RH", 0.5),
        ] {
            let text = error_text(&v);
            assert_eq!(text, "Error: CoolProp failed. Input pair variable is invalid");
            assert!(!text.contains("1e308") && !text.contains("NaN") && !text.contains("inf"));
        }
    }
}

#[test]
fn sentinel_without_diagnostic_still_reports() {
    let calc = Calculator::new(MockEngine::returning(1.0e308));
    let v = calc.cprop_si("H", "T", 300.0, "P", 1.0e5, "Water");
    assert_eq!(error_text(&v), "Error: CoolProp failed. Unknown CoolProp error");
}

#[test]
fn engine_errors_are_rendered() {
    let calc = Calculator::new(MockEngine::returning(1.0).raising("key [Foo] was not found"));
    let v = calc.cprop_si("Foo", "T", 300.0, "P", 1.0e5, "Water");
    assert_eq!(error_text(&v), "Error: key [Foo] was not found");
}

#[test]
fn engine_failure_keeps_its_own_diagnostic() {
    let calc = Calculator::new(
        MockEngine::returning(0.0)
            .last_error("stale message")
            .failing(|call| match call {
                Call::Props { fluid, .. } => format!("failed for {fluid}"),
                _ => "wrong call".into(),
            }),
    );
    let v = calc.cprop_si("H", "T", 300.0, "P", 1.0e5, "Water");
    assert_eq!(error_text(&v), "Error: CoolProp failed. failed for Water");
}

#[test]
fn concurrent_failures_report_their_own_diagnostic() {
    let barrier = Arc::new(Barrier::new(2));
    let calc = Calculator::new(
        MockEngine::returning(0.0)
            .failing(|call| match call {
                Call::Props { fluid, .. } => format!("failed for {fluid}"),
                _ => "wrong call".into(),
            })
            .rendezvous(barrier),
    );

    thread::scope(|s| {
        let handles: Vec<_> = ["R32", "R134a"]
            .into_iter()
            .map(|fluid| {
                let calc = &calc;
                s.spawn(move || (fluid, calc.cprop_si("H", "T", 300.0, "P", 1.0e5, fluid)))
            })
            .collect();
        for handle in handles {
            let (fluid, v) = handle.join().unwrap();
            assert_eq!(error_text(&v), format!("Error: CoolProp failed. failed for {fluid}"));
        }
    });
}

#[test]
fn engine_panics_do_not_escape() {
    let calc = Calculator::new(MockEngine::returning(1.0).panicking());
    let v = calc.cprop_e("H", "T", 25.0, "P", 1.0, "Water");
    assert_eq!(error_text(&v), "Error: mock engine panic");
}

#[test]
fn typed_api_returns_errors() {
    let calc = Calculator::new(MockEngine::returning(f64::NAN).last_error("bad state"));
    assert_eq!(
        calc.props(Units::Si, "H", "T", 300.0, "P", 1.0e5, "Water"),
        Err(CalcError::EngineFailure("bad state".into())),
    );
    assert_eq!(
        calc.props(Units::Si, "", "T", 300.0, "P", 1.0e5, "Water"),
        Err(CalcError::MissingArgument("output")),
    );
}

#[test]
fn unavailable_engine_degrades_every_operation() {
    let calc = Calculator::unavailable("libCoolProp.so not found");
    let expected = CellValue::Text("ERROR: CoolProp not installed. libCoolProp.so not found".into());

    assert_eq!(calc.cprop("H", "T", 25.0, "P", 1.0, "Water"), expected);
    assert_eq!(calc.cprop_si("H", "T", 298.15, "P", 1.0e5, "Water"), expected);
    assert_eq!(calc.cpropha_e("W", "T", 25.0, "P", 1.01325, "RH", 0.5), expected);
    assert_eq!(calc.props1("Tcrit", "Water"), expected);
    assert_eq!(calc.phase("T", 25.0, "P", 1.0, "Water"), expected);
    assert_eq!(calc.global_param("version"), expected);
    assert_eq!(calc.fluid_param("Water", "CAS"), expected);
    // Even invalid arguments get the not-installed message.
    assert_eq!(calc.cprop("", "T", "x", "P", 1.0, "Water"), expected);
}

// ═══════════════════════════════════════════════════════════════════
//  Humid air
// ═══════════════════════════════════════════════════════════════════

#[test]
fn humid_air_engineering_conversion() {
    let engine = MockEngine::returning(50_423.0);
    let calc = Calculator::new(engine.clone());

    let v = calc.cpropha_e("hha", "tdb", 25.0, "p", 1.01325, "rh", 0.5);
    assert_relative_eq!(number(&v), 50.423, max_relative = 1e-12);

    let Call::HaProps {
        output,
        name1,
        value1,
        name2,
        value2,
        name3,
        value3,
    } = engine.last_call()
    else {
        panic!("expected a HAPropsSI call");
    };
    assert_eq!((output.as_str(), name1.as_str(), name2.as_str(), name3.as_str()), ("Hha", "T", "P", "R"));
    assert_relative_eq!(value1, 298.15, max_relative = 1e-12);
    assert_relative_eq!(value2, 101_325.0, max_relative = 1e-12);
    assert_relative_eq!(value3, 0.5);
}

#[test]
fn humid_air_dew_point_and_vapor_pressure() {
    let engine = MockEngine::returning(283.15);
    let calc = Calculator::new(engine.clone());
    let v = calc.cpropha_e("dewpoint", "T", 20.0, "P_w", 0.01, "P", 1.0);
    assert_relative_eq!(number(&v), 10.0, epsilon = 1e-9);

    let Call::HaProps { output, name2, value2, .. } = engine.last_call() else {
        panic!("expected a HAPropsSI call");
    };
    assert_eq!(output, "Tdp");
    assert_eq!(name2, "P_w");
    assert_relative_eq!(value2, 1000.0, max_relative = 1e-12);
}

#[test]
fn humid_air_si_passes_through() {
    let engine = MockEngine::returning(0.0099);
    let calc = Calculator::new(engine.clone());
    let v = calc.cpropha_si("W", "T", 298.15, "P", 101_325.0, "R", 0.5);
    assert_relative_eq!(number(&v), 0.0099);
    let Call::HaProps { value1, value2, .. } = engine.last_call() else {
        panic!("expected a HAPropsSI call");
    };
    assert_eq!((value1, value2), (298.15, 101_325.0));
}

// ═══════════════════════════════════════════════════════════════════
//  Trivial properties, phase and parameters
// ═══════════════════════════════════════════════════════════════════

#[test]
fn props1_converts_from_si() {
    let engine = MockEngine::returning(647.096);
    let calc = Calculator::new(engine.clone());

    assert_relative_eq!(number(&calc.props1_si("Tcrit", "Water")), 647.096);
    assert_relative_eq!(number(&calc.props1("tcrit", "water")), 373.946, max_relative = 1e-9);
    assert_eq!(
        engine.last_call(),
        Call::Props1 {
            output: "Tcrit".into(),
            fluid: "Water".into()
        }
    );

    let calc = Calculator::new(MockEngine::returning(22.064e6));
    assert_relative_eq!(number(&calc.props1("pcrit", "Water")), 220.64, max_relative = 1e-9);
}

#[test]
fn phase_converts_inputs() {
    let engine = MockEngine::returning(0.0).text("liquid");
    let calc = Calculator::new(engine.clone());

    assert_eq!(calc.phase("T", 25.0, "P", 1.0, "Water"), CellValue::from("liquid"));
    let Call::Phase { value1, value2, .. } = engine.last_call() else {
        panic!("expected a PhaseSI call");
    };
    assert_relative_eq!(value1, 298.15, max_relative = 1e-12);
    assert_relative_eq!(value2, 1.0e5, max_relative = 1e-12);

    calc.phase_si("T", 298.15, "P", 1.0e5, "Water");
    let Call::Phase { value1, .. } = engine.last_call() else {
        panic!("expected a PhaseSI call");
    };
    assert_eq!(value1, 298.15);
}

#[test]
fn empty_string_results_are_failures() {
    let calc = Calculator::new(MockEngine::returning(0.0).text("").last_error("unknown fluid"));
    assert_eq!(
        error_text(&calc.phase_si("T", 300.0, "P", 1.0e5, "Nope")),
        "Error: CoolProp failed. unknown fluid"
    );
    assert!(calc.global_param("nope").is_error());
    assert!(calc.fluid_param("Water", "nope").is_error());
}

#[test]
fn parameters_are_trimmed() {
    let engine = MockEngine::returning(0.0).text(" 6.4.1 \n");
    let calc = Calculator::new(engine.clone());
    assert_eq!(calc.global_param("version"), CellValue::from("6.4.1"));

    calc.fluid_param("co2", "CAS");
    assert_eq!(
        engine.last_call(),
        Call::FluidParam {
            fluid: "CarbonDioxide".into(),
            param: "CAS".into()
        }
    );
}

#[test]
fn mixture_string_works_without_engine() {
    let calc = Calculator::unavailable("none");
    let v = calc.mixture_string(
        &[CellValue::from("R32"), CellValue::from("R125")],
        &[CellValue::from(0.697615), CellValue::from(0.302385)],
    );
    assert_eq!(v, CellValue::from("HEOS::R32[0.697615]&R125[0.302385]"));

    let v = calc.mixture_string(&[CellValue::from("R32")], &[CellValue::from(2.0)]);
    assert!(error_text(&v).contains("out of range"));
}

#[test]
fn diagnostics_lists_search_paths() {
    let calc = Calculator::new(MockEngine::returning(0.0).text("6.4.1"));
    let report = calc.diagnostics().to_string();
    assert!(report.starts_with("CoolProp library search paths:"));
    assert!(report.contains("FOUND"));
    assert!(report.contains("loaded (CoolProp 6.4.1)"));

    let report = Calculator::unavailable("nothing here").diagnostics().to_string();
    assert!(report.contains("not loaded (ERROR: CoolProp not installed. nothing here)"));
}
