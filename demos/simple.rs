use coolprop_calc::{Calculator, Units};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // COOLPROP_PATH is read from the .env file automatically.
    // You can also set it as an environment variable:
    //   export COOLPROP_PATH=/opt/coolprop/libCoolProp.so
    let calc = Calculator::from_env();
    if !calc.is_available() {
        println!("{}", calc.diagnostics());
        return Ok(());
    }

    println!("CoolProp {}\n", calc.global_param("version"));

    // ── Cell functions: engineering units (°C, bar, kJ/kg) ──────────
    let h = calc.cprop("H", "T", 25.0, "P", 1.0, "Water");
    println!("CPROP(H, T=25 °C, P=1 bar, Water)   = {h} kJ/kg");

    let h_si = calc.cprop_si("H", "T", 298.15, "P", 1.0e5, "Water");
    println!("CPROP_SI(H, T=298.15 K, P=1e5 Pa)   = {h_si} J/kg");

    // Aliases are case-insensitive
    let rho = calc.cprop("rho", "temp", 25.0, "pressure", 1.0, "h2o");
    println!("CPROP(rho, temp, pressure, h2o)     = {rho} kg/m³");

    // ── Saturation: R134a at 0 °C ───────────────────────────────────
    let p_sat = calc.cprop("P", "T", 0.0, "Q", 0.0, "R134a");
    println!("\nR134a Psat(0 °C)   = {p_sat} bar");
    let h_vap = calc.cprop("H", "T", 0.0, "Q", 1.0, "R134a");
    println!("R134a h''(0 °C)    = {h_vap} kJ/kg");
    println!("R134a phase at 25 °C, 5 bar: {}", calc.phase("T", 25.0, "P", 5.0, "R-134a"));

    // ── Critical point and fluid info ───────────────────────────────
    println!("\nCO2 Tcrit = {} °C", calc.props1("Tcrit", "CO2"));
    println!("CO2 pcrit = {} bar", calc.props1("pcrit", "CO2"));
    println!("CO2 CAS   = {}", calc.fluid_param("CO2", "CAS"));

    // ── Mixtures ────────────────────────────────────────────────────
    let r410a = calc.mixture_string(
        &["R32".into(), "R125".into()],
        &[0.697615_f64.into(), 0.302385_f64.into()],
    );
    println!("\nMixture: {r410a}");
    if let Some(mix) = r410a.as_text() {
        let d = calc.props(Units::Engineering, "D", "T", 0.0, "Q", 1.0, mix)?;
        println!("D_vap(0 °C) = {d:.4} kg/m³");
    }

    // ── Errors come back as text ────────────────────────────────────
    println!("\n{}", calc.cprop("H", "T", "hot", "P", 1.0, "Water"));
    println!("{}", calc.cprop("H", "T", 25.0, "Q", 7.0, "Water"));
    Ok(())
}
