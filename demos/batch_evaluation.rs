use formula_rs::Formula;
use std::collections::HashMap;

fn main() {
    pretty_env_logger::init();

    let formula = Formula::new("(high - low) / close * 100").expect("Failed to parse");

    let contexts: Vec<HashMap<String, f64>> = (0..8)
        .map(|i| {
            HashMap::from([
                ("high".to_string(), 110.0 + i as f64),
                ("low".to_string(), 90.0 - i as f64),
                ("close".to_string(), (i % 4) as f64 * 25.0),
            ])
        })
        .collect();

    for (i, result) in formula.evaluate_batch(&contexts).iter().enumerate() {
        match result {
            Ok(value) if value.is_nan() => println!("Result {}: undefined", i),
            Ok(value) => println!("Result {}: {:.2}", i, value),
            Err(err) => println!("Error {}: {}", i, err),
        }
    }
}
