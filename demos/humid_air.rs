use coolprop_calc::Calculator;

fn main() {
    let calc = Calculator::from_env();

    // ================================================================
    //  Psychrometrics at 1 atm, engineering units
    // ================================================================
    let p = 1.01325; // bar
    println!("=== Humid air at P = {p} bar ===\n");
    println!("{:>6} {:>6} {:>12} {:>12} {:>10} {:>10}", "T °C", "RH", "W kg/kg", "h kJ/kg", "Twb °C", "Tdp °C");

    for t in [0.0, 10.0, 20.0, 30.0, 40.0] {
        for rh in [0.3, 0.6, 0.9] {
            let w = calc.cpropha("W", "T", t, "P", p, "RH", rh);
            let h = calc.cpropha("Hha", "T", t, "P", p, "RH", rh);
            let twb = calc.cpropha("Twb", "T", t, "P", p, "RH", rh);
            let tdp = calc.cpropha("dewpoint", "T", t, "P", p, "RH", rh);
            println!(
                "{t:>6.1} {rh:>6.2} {:>12} {:>12} {:>10} {:>10}",
                fmt(&w, 5),
                fmt(&h, 2),
                fmt(&twb, 2),
                fmt(&tdp, 2)
            );
        }
    }

    // ================================================================
    //  SI entry point and an out-of-range request
    // ================================================================
    println!();
    let w = calc.cpropha_si("W", "T", 298.15, "P", 101_325.0, "R", 0.5);
    println!("CPROPHA_SI(W, T=298.15 K, P=101325 Pa, R=0.5) = {w}");
    println!("{}", calc.cpropha("W", "T", 25.0, "P", p, "RH", 1.5));
}

fn fmt(v: &coolprop_calc::CellValue, digits: usize) -> String {
    match v.as_number() {
        Some(x) => format!("{x:.digits$}"),
        None => v.to_string(),
    }
}
