//! What rscov output looks like: every function body opens with a probe.
//!
//! This file was written by hand to match what
//! `rscov src/main.rs --out-dir ...` emits. Run it, then read
//! `coverage.txt` (or wherever `RSCOV_REPORT` points): `cold` is never
//! called, so its probe never appears in the report.

fn greet(name: &str) -> String { rscov_runtime::hit("greet:8");
    format!("hello, {}", name)
}

fn shout(text: &str) -> String { rscov_runtime::hit("shout:12");
    text.to_uppercase()
}

#[allow(dead_code)]
fn cold() { rscov_runtime::hit("cold:17");
    unreachable!("never called");
}

fn main() { rscov_runtime::hit("main:21");
    let _cov = rscov_runtime::dump_on_exit();
    println!("{}", shout(&greet("rscov")));
}
