//! Expression tree to typeset text.
//!
//! Two forms are produced: LaTeX markup and a Unicode rendering (superscripts,
//! `√`, `·`, Greek letters) that the rasterizer can draw with an ordinary font.

use tracing::debug;

use super::parse::{Expr, parse};

/// Typeset form of an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Typeset {
    pub latex: String,
    pub display: String,
    /// `false` when parsing failed and both forms are the raw input.
    pub parsed: bool,
}

impl Typeset {
    fn raw(expr: &str) -> Self {
        Self {
            latex: expr.to_string(),
            display: expr.to_string(),
            parsed: false,
        }
    }
}

/// Typeset `expr`, degrading to the raw text when it does not parse.
pub fn typeset(expr: &str) -> Typeset {
    match parse(expr) {
        Ok(tree) => Typeset {
            latex: to_latex(&tree),
            display: to_display(&tree),
            parsed: true,
        },
        Err(e) => {
            debug!(error = %e, "expression did not parse, typesetting raw text");
            Typeset::raw(expr)
        },
    }
}

const GREEK: &[(&str, &str, &str)] = &[
    ("alpha", "\\alpha", "α"),
    ("beta", "\\beta", "β"),
    ("gamma", "\\gamma", "γ"),
    ("delta", "\\delta", "δ"),
    ("epsilon", "\\epsilon", "ε"),
    ("theta", "\\theta", "θ"),
    ("lambda", "\\lambda", "λ"),
    ("mu", "\\mu", "μ"),
    ("pi", "\\pi", "π"),
    ("rho", "\\rho", "ρ"),
    ("sigma", "\\sigma", "σ"),
    ("tau", "\\tau", "τ"),
    ("phi", "\\phi", "φ"),
    ("omega", "\\omega", "ω"),
    ("Delta", "\\Delta", "Δ"),
    ("Sigma", "\\Sigma", "Σ"),
    ("Omega", "\\Omega", "Ω"),
    ("oo", "\\infty", "∞"),
    ("inf", "\\infty", "∞"),
];

const LATEX_FUNCTIONS: &[&str] = &[
    "sin", "cos", "tan", "cot", "sec", "csc", "sinh", "cosh", "tanh", "arcsin", "arccos", "arctan",
    "log", "ln", "exp", "min", "max", "det",
];

fn greek(name: &str) -> Option<(&'static str, &'static str)> {
    GREEK
        .iter()
        .find(|(n, ..)| *n == name)
        .map(|(_, latex, display)| (*latex, *display))
}

fn superscript(c: char) -> Option<char> {
    Some(match c {
        '0' => '⁰',
        '1' => '¹',
        '2' => '²',
        '3' => '³',
        '4' => '⁴',
        '5' => '⁵',
        '6' => '⁶',
        '7' => '⁷',
        '8' => '⁸',
        '9' => '⁹',
        '+' => '⁺',
        '-' | '−' => '⁻',
        'n' => 'ⁿ',
        'i' => 'ⁱ',
        _ => return None,
    })
}

fn to_superscript(text: &str) -> Option<String> {
    text.chars().map(superscript).collect()
}

// ── LaTeX ────────────────────────────────────────────────────────────────────

fn to_latex(expr: &Expr) -> String {
    match expr {
        Expr::Number(n) => n.clone(),
        Expr::Symbol(s) => greek(s).map_or_else(|| s.clone(), |(latex, _)| latex.to_string()),
        Expr::Neg(inner) => format!("-{}", latex_wrapped(inner, inner.precedence() < 2)),
        Expr::Add(l, r) => format!("{} + {}", to_latex(l), to_latex(r)),
        Expr::Sub(l, r) => format!("{} - {}", to_latex(l), latex_wrapped(r, r.precedence() <= 1)),
        Expr::Mul(l, r) => format!(
            "{} \\cdot {}",
            latex_wrapped(l, l.precedence() < 2),
            latex_wrapped(r, r.precedence() < 2 || matches!(**r, Expr::Neg(_)))
        ),
        Expr::Div(l, r) => format!("\\frac{{{}}}{{{}}}", to_latex(l), to_latex(r)),
        Expr::Pow(base, exp) => format!(
            "{}^{{{}}}",
            latex_wrapped(base, base.precedence() < 5),
            to_latex(exp)
        ),
        Expr::Call(name, args) => latex_call(name, args),
    }
}

fn latex_wrapped(expr: &Expr, wrap: bool) -> String {
    if wrap {
        format!("\\left({}\\right)", to_latex(expr))
    } else {
        to_latex(expr)
    }
}

fn latex_call(name: &str, args: &[Expr]) -> String {
    let joined = args.iter().map(to_latex).collect::<Vec<_>>().join(", ");
    match name {
        "sqrt" if args.len() == 1 => format!("\\sqrt{{{joined}}}"),
        "abs" if args.len() == 1 => format!("\\left|{joined}\\right|"),
        _ if LATEX_FUNCTIONS.contains(&name) => format!("\\{name}\\left({joined}\\right)"),
        _ => format!("\\operatorname{{{name}}}\\left({joined}\\right)"),
    }
}

// ── Unicode ──────────────────────────────────────────────────────────────────

fn to_display(expr: &Expr) -> String {
    match expr {
        Expr::Number(n) => n.clone(),
        Expr::Symbol(s) => greek(s).map_or_else(|| s.clone(), |(_, display)| display.to_string()),
        Expr::Neg(inner) => format!("−{}", display_wrapped(inner, inner.precedence() < 2)),
        Expr::Add(l, r) => format!("{} + {}", to_display(l), to_display(r)),
        Expr::Sub(l, r) => format!(
            "{} − {}",
            to_display(l),
            display_wrapped(r, r.precedence() <= 1)
        ),
        Expr::Mul(l, r) => format!(
            "{}·{}",
            display_wrapped(l, l.precedence() < 2),
            display_wrapped(r, r.precedence() < 2 || matches!(**r, Expr::Neg(_)))
        ),
        Expr::Div(l, r) => format!(
            "{}/{}",
            display_wrapped(l, l.precedence() < 2),
            display_wrapped(r, r.precedence() <= 2)
        ),
        Expr::Pow(base, exp) => {
            let base = display_wrapped(base, base.precedence() < 5);
            let exp_text = to_display(exp);
            match to_superscript(&exp_text) {
                Some(sup) => format!("{base}{sup}"),
                None => format!("{base}^{}", display_wrapped(exp, exp.precedence() < 5)),
            }
        },
        Expr::Call(name, args) => display_call(name, args),
    }
}

fn display_wrapped(expr: &Expr, wrap: bool) -> String {
    if wrap {
        format!("({})", to_display(expr))
    } else {
        to_display(expr)
    }
}

fn display_call(name: &str, args: &[Expr]) -> String {
    match (name, args) {
        ("sqrt", [arg]) => format!("√{}", display_wrapped(arg, arg.precedence() < 5)),
        ("abs", [arg]) => format!("|{}|", to_display(arg)),
        _ => {
            let joined = args.iter().map(to_display).collect::<Vec<_>>().join(", ");
            format!("{name}({joined})")
        },
    }
}
