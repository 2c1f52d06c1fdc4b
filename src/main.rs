#![allow(non_snake_case)]
use SymRegPost::pipeline::constraints::{select_constraints, select_nested_constraints};
use SymRegPost::pipeline::emitter::emit_records;
use SymRegPost::pipeline::operators::{PredictedFunction, extract_unary_operators};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::collections::{HashMap, HashSet};

fn main() {
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .expect("logger init");

    // a ranked batch as it would come out of the pretrained model
    let candidates = vec![
        PredictedFunction::new("sin(x_0) add (x_1 mul x_1)"),
        PredictedFunction::new("sin(x_0) mul (x_1 add 1)"),
        PredictedFunction::new("tan(x_0) add sqrt(x_1)"),
        PredictedFunction::new("(x_0 add 1) mul (x_0 sub 1)"),
    ];

    let vocabulary = extract_unary_operators(&candidates);
    println!("unary operator vocabulary of the batch: {:?}", vocabulary);

    let table = emit_records(&candidates).expect("post-processing failed");
    println!("\n{}", table.to_csv_string().expect("CSV rendering failed"));

    // restrict a constraint configuration to the operators in play
    let ops_list: HashSet<String> = vocabulary.iter().map(|op| op.to_string()).collect();
    let constraints = HashMap::from([
        ("sin".to_string(), 3),
        ("tan".to_string(), 1),
        ("exp".to_string(), 2),
    ]);
    let nested = HashMap::from([(
        "sin".to_string(),
        HashMap::from([("sin".to_string(), 0), ("tan".to_string(), 1)]),
    )]);
    println!("constraints: {:?}", select_constraints(&constraints, &ops_list));
    println!(
        "nested constraints: {:?}",
        select_nested_constraints(&nested, &ops_list)
    );
}
