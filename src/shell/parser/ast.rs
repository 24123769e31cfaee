/// Commands the shell runs in its own process when they appear alone on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Builtin {
    #[default]
    None,
    Cd,
    Exit,
}

impl Builtin {
    pub fn from_program(program: &str) -> Self {
        match program {
            "cd" => Builtin::Cd,
            "exit" => Builtin::Exit,
            _ => Builtin::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Pipe,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Pipe => "|",
        }
    }
}

/// One program invocation: `tokens[0]` is the program, the rest are its
/// arguments. Never built with an empty token list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SimpleCommand {
    pub tokens: Vec<String>,
    pub builtin: Builtin,
    pub stdin: Option<String>,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

impl SimpleCommand {
    pub fn new(tokens: Vec<String>) -> Self {
        let builtin = tokens
            .first()
            .map(|program| Builtin::from_program(program))
            .unwrap_or_default();
        Self {
            tokens,
            builtin,
            ..Self::default()
        }
    }

    pub fn program(&self) -> &str {
        self.tokens.first().map(String::as_str).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Simple(SimpleCommand),
    Complex {
        operator: Operator,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn pipe(left: Node, right: Node) -> Self {
        Node::Complex {
            operator: Operator::Pipe,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}
