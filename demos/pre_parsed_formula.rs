use formula_rs::Formula;
use std::collections::HashMap;

fn main() {
    pretty_env_logger::init();

    let formula = Formula::new("(price + 1) * 100").expect("Failed to parse");
    println!("Variables: {:?}", formula.variables());

    let postfix: Vec<String> = formula.postfix().iter().map(|t| t.to_string()).collect();
    println!("Postfix: {}", postfix.join(" "));

    let context: HashMap<String, f64> = [("price".to_string(), 5.0)].iter().cloned().collect();

    match formula.evaluate(Some(&context)) {
        Ok(result) => println!("Result: {}", result),
        Err(err) => println!("Error: {}", err),
    }
}
