//! CLI wrapper for the jsbridge engine.
//!
//! Usage:
//!   jsbridge <file.js>              # Execute a script file
//!   jsbridge -e "code"              # Evaluate code and print the result
//!   jsbridge -t "code"              # Print the parse tree
//!   jsbridge                        # Start REPL (interactive mode)
//!
//! Scripts can call `Host.print(s)` and `Host.env(name)`.

use jsbridge::embed::{Bridge, Context, EmbedError, Evaluator, Globals, NativeHandle, VmInstance};
use jsbridge::parser::parse_to_token_tree;
use std::env;
use std::fs;
use std::io::{self, Write};
use std::process;

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().collect();

    let code = match args.len() {
        1 => with_engine(run_repl),
        2 if args[1] == "-h" || args[1] == "--help" => {
            print_usage();
            0
        }
        2 => {
            let filename = args[1].clone();
            with_engine(move |ctx| run_file(ctx, &filename))
        }
        3 if args[1] == "-e" || args[1] == "--eval" => {
            let code = args[2].clone();
            with_engine(move |ctx| eval_code(ctx, &code))
        }
        3 if args[1] == "-t" || args[1] == "--tree" => print_tree(&args[2]),
        _ => {
            print_usage();
            1
        }
    };
    process::exit(code);
}

fn print_usage() {
    eprintln!("jsbridge {} ({})", Globals::version(), Globals::build_date());
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  jsbridge <file.js>              Execute a script file");
    eprintln!("  jsbridge -e \"code\"              Evaluate code");
    eprintln!("  jsbridge --eval \"code\"          Evaluate code");
    eprintln!("  jsbridge -t \"code\"              Print the parse tree");
    eprintln!("  jsbridge                        Start REPL (interactive mode)");
}

/// Sets up globals, a VM and a context with the `Host` bridge, runs `f`, and tears everything down.
fn with_engine<F>(f: F) -> i32
where
    F: FnOnce(&Context) -> i32,
{
    let globals = match Globals::initialize() {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let vm = match VmInstance::create(&globals, None, None) {
        Ok(vm) => vm,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let code = match Context::create(&vm).and_then(|ctx| install_host(&ctx).map(|_| ctx)) {
        Ok(ctx) => {
            let code = f(&ctx);
            ctx.destroy();
            code
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };
    vm.destroy();
    globals.finalize();
    code
}

fn install_host(ctx: &Context) -> Result<(), EmbedError> {
    Bridge::register(ctx, "Host", "print", |s: Option<String>| {
        println!("{}", s.unwrap_or_default());
        None
    })?;
    Bridge::register(ctx, "Host", "env", |name: Option<String>| {
        name.and_then(|n| env::var(n).ok())
    })
}

fn report(e: &EmbedError) {
    match e {
        EmbedError::ParseError { .. } => eprintln!("Parse error: {}", e),
        _ => eprintln!("Runtime error: {}", e),
    }
}

fn run_file(ctx: &Context, filename: &str) -> i32 {
    let source = match fs::read_to_string(filename) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", filename, e);
            return 1;
        }
    };
    match Evaluator::eval_script_value(ctx, &source, filename, false) {
        Ok(_) => 0,
        Err(e) => {
            report(&e);
            1
        }
    }
}

fn eval_code(ctx: &Context, code: &str) -> i32 {
    let result = Evaluator::eval_script_value(ctx, code, "<eval>", true)
        .and_then(|v| if v.is_undefined()? { Ok(None) } else { v.to_string(ctx).map(Some) });
    match result {
        Ok(Some(s)) => {
            println!("{}", s);
            0
        }
        Ok(None) => 0,
        Err(e) => {
            report(&e);
            1
        }
    }
}

fn print_tree(code: &str) -> i32 {
    match parse_to_token_tree(code) {
        Ok(tree) => {
            println!("{}", tree);
            0
        }
        Err(e) => {
            eprintln!("Parse error: {}", e);
            1
        }
    }
}

fn run_repl(ctx: &Context) -> i32 {
    println!("jsbridge v{} - embeddable script engine", Globals::version());
    println!("Type code and press Enter. `$_` holds the last result. Type .exit to quit.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line_no = 0;

    loop {
        print!("> ");
        if stdout.flush().is_err() {
            break;
        }

        let mut input = String::new();
        match stdin.read_line(&mut input) {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {}", e);
                break;
            }
        }

        let input = input.trim();
        if input == ".exit" || input == ".quit" {
            break;
        }
        if input.is_empty() {
            continue;
        }

        line_no += 1;
        let name = format!("<repl:{}>", line_no);
        match Evaluator::eval_script_value(ctx, input, &name, true) {
            Ok(v) => {
                if !matches!(v.is_undefined(), Ok(true)) {
                    match v.to_string(ctx) {
                        Ok(s) => println!("{}", s),
                        Err(e) => report(&e),
                    }
                }
                v.destroy();
            }
            Err(e) => report(&e),
        }
    }

    println!("Goodbye!");
    0
}
