//! Provides an example of how to use varelim to perform inference on a Bayesian Network.
//!
//! The network is the survey network of Scutari & Denis, "Bayesian Networks with Examples in R":
//! Age and Sex influence Education, which influences Occupation and Residence, which in turn
//! influence the means of Transport.
//!
//! Run with `RUST_LOG=varelim=debug` to see the elimination orders.

extern crate env_logger;
extern crate varelim;

use varelim as ve;
use ve::ConditionalInferenceEngine;

fn main() -> ve::Result<()> {
    env_logger::init();

    /////////////////////////////////////////////////////
    // Step 1: Build Model
    let model = build_model()?;

    /////////////////////////////////////////////////////
    // Step 2: Marginal of the means of transport, for every heuristic
    for heuristic in ["min-size", "least-incoming-arcs", "outgoing-arcs-first", "fewest-factors", "random"].iter() {
        let p = ve::posterior(&model, "T", &ve::Evidence::new(), *heuristic)?;
        println!("P(T) using {}:\n{}", heuristic, p);
    }

    /////////////////////////////////////////////////////
    // Step 3: Compile some evidence
    let mut evidence = ve::Evidence::new();
    evidence.insert(String::from("T"), String::from("train"));
    evidence.insert(String::from("S"), String::from("F"));

    /////////////////////////////////////////////////////
    // Step 4: Run some conditional queries, with an explicit elimination order
    let order = ve::EliminationOrder::from(vec!["R", "O", "A", "E"]);
    let mut engine = ve::VariableEliminationEngine::new(&model, order);

    for query in ["A", "E"].iter() {
        let p = engine.infer(query, &evidence)?;
        println!("P({} | T = train, S = F):\n{}", query, p);
    }

    Ok(())
}

fn build_model() -> ve::Result<ve::BayesianNetwork> {
    let a = ve::Variable::new("A", &["young", "adult", "old"]);
    let s = ve::Variable::new("S", &["M", "F"]);
    let e = ve::Variable::new("E", &["high", "uni"]);
    let o = ve::Variable::new("O", &["emp", "self"]);
    let r = ve::Variable::new("R", &["small", "big"]);
    let t = ve::Variable::new("T", &["car", "train", "other"]);

    ve::BayesianNetworkBuilder::new()
        .with_variable(&a, &[], ve::Initialization::Multinomial(&[0.3, 0.5, 0.2]))
        .with_variable(&s, &[], ve::Initialization::Multinomial(&[0.6, 0.4]))
        .with_variable(&e, &["A", "S"], ve::Initialization::Table(&[
            0.75, 0.25,   0.64, 0.36,   // young: M, F
            0.72, 0.28,   0.70, 0.30,   // adult: M, F
            0.88, 0.12,   0.90, 0.10    // old: M, F
        ]))
        .with_variable(&o, &["E"], ve::Initialization::Table(&[0.96, 0.04, 0.92, 0.08]))
        .with_variable(&r, &["E"], ve::Initialization::Table(&[0.25, 0.75, 0.20, 0.80]))
        .with_variable(&t, &["O", "R"], ve::Initialization::Table(&[
            0.48, 0.42, 0.10,   0.58, 0.24, 0.18,   // emp: small, big
            0.56, 0.36, 0.08,   0.70, 0.21, 0.09    // self: small, big
        ]))
        .build()
}
