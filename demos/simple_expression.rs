use formula_rs::evaluate_expression;
use std::collections::HashMap;

fn main() {
    pretty_env_logger::init();

    let contexts = vec![
        HashMap::from([("price".to_string(), 120.0), ("qty".to_string(), 3.0)]),
        HashMap::from([("price".to_string(), 80.0), ("qty".to_string(), 0.0)]),
        HashMap::from([("price".to_string(), 80.0)]),
    ];

    let expression = "price * qty - price / qty";

    for (i, context) in contexts.iter().enumerate() {
        match evaluate_expression(expression, Some(context)) {
            Ok(result) => println!("Result {}: {}", i, result),
            Err(err) => println!("Error {}: {}", i, err),
        }
    }
}
