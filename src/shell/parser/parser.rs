use log::debug;

use super::ast::{Node, SimpleCommand};
use super::lexer::{Lexer, RedirectOp, Token};
use crate::shell::error::ParseError;

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current_token: Token,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let current_token = lexer.next_token();
        Parser {
            lexer,
            current_token,
        }
    }

    fn next_token(&mut self) {
        self.current_token = self.lexer.next_token();
    }

    /// Parses one command line. Pipelines nest to the left, so `a | b | c`
    /// becomes `(a | b) | c`. A blank line yields `None`.
    pub fn parse_command(&mut self) -> Result<Option<Node>, ParseError> {
        if self.current_token == Token::EOF {
            return Ok(None);
        }

        let mut node = Node::Simple(self.parse_simple_command()?);
        while self.current_token == Token::Pipe {
            self.next_token();
            let right = self.parse_simple_command()?;
            node = Node::pipe(node, Node::Simple(right));
        }
        debug!("parsed command tree: {:?}", node);
        Ok(Some(node))
    }

    fn parse_simple_command(&mut self) -> Result<SimpleCommand, ParseError> {
        let mut tokens = Vec::new();
        let mut redirections = Vec::new();

        loop {
            match &self.current_token {
                Token::EOF | Token::Pipe => break,
                Token::Redirect(op) => {
                    let op = *op;
                    let target = self.parse_redirection(op)?;
                    redirections.push((op, target));
                }
                Token::Word(word) => {
                    tokens.push(word.clone());
                    self.next_token();
                }
            }
        }

        if tokens.is_empty() {
            return Err(if redirections.is_empty() {
                ParseError::EmptyPipeSide
            } else {
                ParseError::MissingProgram
            });
        }

        let mut command = SimpleCommand::new(tokens);
        for (op, target) in redirections {
            match op {
                RedirectOp::Input => command.stdin = Some(target),
                RedirectOp::Output => command.stdout = Some(target),
                RedirectOp::Error => command.stderr = Some(target),
            }
        }
        Ok(command)
    }

    fn parse_redirection(&mut self, operator: RedirectOp) -> Result<String, ParseError> {
        self.next_token(); // skip the operator

        match &self.current_token {
            Token::Word(filename) => {
                let filename = filename.clone();
                self.next_token();
                Ok(filename)
            }
            _ => Err(ParseError::MissingRedirectTarget(match operator {
                RedirectOp::Input => "<",
                RedirectOp::Output => ">",
                RedirectOp::Error => "2>",
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::parser::ast::{Builtin, Operator};

    fn parse(line: &str) -> Result<Option<Node>, ParseError> {
        Parser::new(line).parse_command()
    }

    fn simple(node: &Node) -> &SimpleCommand {
        match node {
            Node::Simple(cmd) => cmd,
            other => panic!("expected simple command, got {:?}", other),
        }
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn test_simple_command() {
        let node = parse("ls -l").unwrap().unwrap();
        let cmd = simple(&node);
        assert_eq!(cmd.tokens, vec!["ls", "-l"]);
        assert_eq!(cmd.builtin, Builtin::None);
        assert!(cmd.stdin.is_none() && cmd.stdout.is_none() && cmd.stderr.is_none());
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn test_blank_line() {
        assert_eq!(parse("").unwrap(), None);
        assert_eq!(parse("   \t ").unwrap(), None);
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn test_builtin_tagging() {
        let node = parse("cd /tmp").unwrap().unwrap();
        assert_eq!(simple(&node).builtin, Builtin::Cd);
        let node = parse("exit").unwrap().unwrap();
        assert_eq!(simple(&node).builtin, Builtin::Exit);
        let node = parse("echo cd").unwrap().unwrap();
        assert_eq!(simple(&node).builtin, Builtin::None);
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn test_pipeline_nests_left() {
        let node = parse("cat f | sort | uniq -c").unwrap().unwrap();
        let Node::Complex {
            operator,
            left,
            right,
        } = node
        else {
            panic!("expected pipeline");
        };
        assert_eq!(operator, Operator::Pipe);
        assert_eq!(simple(&right).tokens, vec!["uniq", "-c"]);

        let Node::Complex { left, right, .. } = *left else {
            panic!("expected nested pipeline on the left");
        };
        assert_eq!(simple(&left).tokens, vec!["cat", "f"]);
        assert_eq!(simple(&right).tokens, vec!["sort"]);
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn test_redirections() {
        let node = parse("sort < in.txt > out.txt 2> err.txt -r").unwrap().unwrap();
        let cmd = simple(&node);
        assert_eq!(cmd.tokens, vec!["sort", "-r"]);
        assert_eq!(cmd.stdin.as_deref(), Some("in.txt"));
        assert_eq!(cmd.stdout.as_deref(), Some("out.txt"));
        assert_eq!(cmd.stderr.as_deref(), Some("err.txt"));
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn test_last_redirection_wins() {
        let node = parse("echo hi > a > b").unwrap().unwrap();
        assert_eq!(simple(&node).stdout.as_deref(), Some("b"));
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse("| wc"), Err(ParseError::EmptyPipeSide));
        assert_eq!(parse("ls |"), Err(ParseError::EmptyPipeSide));
        assert_eq!(parse("ls || wc"), Err(ParseError::EmptyPipeSide));
        assert_eq!(parse("cat <"), Err(ParseError::MissingRedirectTarget("<")));
        assert_eq!(
            parse("ls 2> | wc"),
            Err(ParseError::MissingRedirectTarget("2>"))
        );
        assert_eq!(parse("> out"), Err(ParseError::MissingProgram));
    }
}
