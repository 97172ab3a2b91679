//! A recursive-descent parser for the textual IR grammar (spec.md §6):
//!
//! ```text
//! file        ::= block*
//! block       ::= LABEL ':' NL instruction*
//! instruction ::= REG '<-' operation NL
//!               | 'PRINT' operation NL
//!               | 'BR' LABEL NL
//!               | 'BR' value ',' LABEL ',' LABEL NL
//! operation   ::= value ('+' value)?
//! value       ::= REG | INT
//! ```
//!
//! Comments start with `;` and run to end of line; newlines are the only
//! significant whitespace, so this parser works line-by-line rather than
//! over a flat token stream. Parser state (the current line number and
//! in-progress CFG) lives in a [`Parser`] value, not module-level globals
//! (spec.md §9's "process-wide parser state" note).

use std::fs;
use std::path::Path;

use super::block::BlockId;
use super::cfg::Cfg;
use super::instruction::Instruction;
use super::operation::Operation;
use super::value::Value;
use crate::common::errors::ParseError;

/// Parse a file on disk into a [`Cfg`].
pub fn parse_file(path: &Path) -> Result<Cfg, ParseError> {
    let text = fs::read_to_string(path).map_err(|_| ParseError::UnexpectedEof {
        expected: "a readable IR file",
    })?;
    parse_str(&text)
}

/// Parse IR source text into a [`Cfg`].
pub fn parse_str(text: &str) -> Result<Cfg, ParseError> {
    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, strip_comment(line)))
        .filter(|(_, line)| !line.trim().is_empty())
        .collect();

    let block_count = count_and_validate_blocks(&lines)?;

    let mut cfg = Cfg::new();
    for _ in 0..block_count {
        cfg.add_block();
    }

    let mut current: Option<BlockId> = None;
    for (line_no, line) in &lines {
        let tokens = lex_line(*line_no, line)?;
        if tokens.is_empty() {
            continue;
        }
        if let Some(Token::Label(n)) = tokens.first() {
            expect(&tokens, 1, Token::Colon, *line_no, ":")?;
            if tokens.len() > 2 {
                return Err(ParseError::UnexpectedToken {
                    line: *line_no,
                    expected: "end of line after ':'",
                    found: format!("{:?}", tokens[2]),
                });
            }
            current = Some(BlockId(*n));
            continue;
        }

        let block = current.ok_or(ParseError::UnexpectedEof {
            expected: "a block label before any instruction",
        })?;
        let inst = parse_instruction(&tokens, *line_no, block_count)?;
        if let Instruction::BrUncond { target } = &inst {
            cfg.add_edge(block, *target);
        }
        if let Instruction::BrCond { then, els, .. } = &inst {
            cfg.add_edge(block, *then);
            cfg.add_edge(block, *els);
        }
        note_registers(&mut cfg, &inst);
        cfg.block_mut(block).insts.push(inst);
    }

    Ok(cfg)
}

fn note_registers(cfg: &mut Cfg, inst: &Instruction) {
    match inst {
        Instruction::Def { reg, op } => {
            cfg.note_register(*reg);
            note_value(cfg, op.lhs);
            if op.is_add() {
                note_value(cfg, op.rhs);
            }
        }
        Instruction::Print { op } => {
            note_value(cfg, op.lhs);
            if op.is_add() {
                note_value(cfg, op.rhs);
            }
        }
        Instruction::BrCond { cond, .. } => note_value(cfg, *cond),
        Instruction::BrUncond { .. } => {}
    }
}

fn note_value(cfg: &mut Cfg, v: Value) {
    if let Some(r) = v.as_register() {
        cfg.note_register(r);
    }
}

/// First pass: find every block-header line, check labels are `0, 1, 2, ...`
/// in file order, and return the total block count.
fn count_and_validate_blocks(lines: &[(usize, &str)]) -> Result<usize, ParseError> {
    let mut expected = 0usize;
    for (line_no, line) in lines {
        let tokens = lex_line(*line_no, line)?;
        if let Some(Token::Label(n)) = tokens.first() {
            if *n != expected {
                return Err(ParseError::BlockOutOfOrder {
                    line: *line_no,
                    expected,
                    found: *n,
                });
            }
            expected += 1;
        }
    }
    Ok(expected)
}

fn parse_instruction(
    tokens: &[Token],
    line: usize,
    block_count: usize,
) -> Result<Instruction, ParseError> {
    match tokens.first() {
        Some(Token::Reg(reg)) => {
            let reg = *reg;
            expect(tokens, 1, Token::Arrow, line, "'<-'")?;
            let op = parse_operation(tokens, 2, line)?;
            Ok(Instruction::Def { reg, op })
        }
        Some(Token::Print) => {
            let op = parse_operation(tokens, 1, line)?;
            Ok(Instruction::Print { op })
        }
        Some(Token::Br) => parse_branch(tokens, line, block_count),
        Some(other) => Err(ParseError::UnexpectedToken {
            line,
            expected: "a register, 'PRINT', or 'BR'",
            found: format!("{other:?}"),
        }),
        None => Err(ParseError::UnexpectedEof {
            expected: "an instruction",
        }),
    }
}

fn parse_branch(
    tokens: &[Token],
    line: usize,
    block_count: usize,
) -> Result<Instruction, ParseError> {
    match tokens.get(1) {
        Some(Token::Label(n)) => {
            if tokens.len() != 2 {
                return Err(ParseError::UnexpectedToken {
                    line,
                    expected: "end of line after branch target",
                    found: format!("{:?}", tokens[2]),
                });
            }
            let target = resolve_block(*n, line, block_count)?;
            Ok(Instruction::BrUncond { target })
        }
        Some(Token::Reg(_)) | Some(Token::Int(_)) => {
            let cond = parse_value(tokens, 1, line)?;
            expect(tokens, 2, Token::Comma, line, "','")?;
            let then = match tokens.get(3) {
                Some(Token::Label(n)) => resolve_block(*n, line, block_count)?,
                other => {
                    return Err(ParseError::UnexpectedToken {
                        line,
                        expected: "a block label",
                        found: format!("{other:?}"),
                    })
                }
            };
            expect(tokens, 4, Token::Comma, line, "','")?;
            let els = match tokens.get(5) {
                Some(Token::Label(n)) => resolve_block(*n, line, block_count)?,
                other => {
                    return Err(ParseError::UnexpectedToken {
                        line,
                        expected: "a block label",
                        found: format!("{other:?}"),
                    })
                }
            };
            if tokens.len() != 6 {
                return Err(ParseError::UnexpectedToken {
                    line,
                    expected: "end of line after branch targets",
                    found: format!("{:?}", tokens[6]),
                });
            }
            Ok(Instruction::BrCond { cond, then, els })
        }
        other => Err(ParseError::UnexpectedToken {
            line,
            expected: "a block label or a value after 'BR'",
            found: format!("{other:?}"),
        }),
    }
}

fn resolve_block(n: usize, line: usize, block_count: usize) -> Result<BlockId, ParseError> {
    if n >= block_count {
        Err(ParseError::UnknownBlock { line, target: n })
    } else {
        Ok(BlockId(n))
    }
}

fn parse_operation(tokens: &[Token], at: usize, line: usize) -> Result<Operation, ParseError> {
    let lhs = parse_value(tokens, at, line)?;
    match tokens.get(at + 1) {
        None => Ok(Operation::simple(lhs)),
        Some(Token::Plus) => {
            let rhs = parse_value(tokens, at + 2, line)?;
            if tokens.len() != at + 3 {
                return Err(ParseError::UnexpectedToken {
                    line,
                    expected: "end of line after operand",
                    found: format!("{:?}", tokens[at + 3]),
                });
            }
            Ok(Operation::add(lhs, rhs))
        }
        Some(other) => Err(ParseError::UnexpectedToken {
            line,
            expected: "'+' or end of line",
            found: format!("{other:?}"),
        }),
    }
}

fn parse_value(tokens: &[Token], at: usize, line: usize) -> Result<Value, ParseError> {
    match tokens.get(at) {
        Some(Token::Reg(r)) => Ok(Value::register(*r)),
        Some(Token::Int(n)) => Ok(Value::immediate(*n)),
        other => Err(ParseError::UnexpectedToken {
            line,
            expected: "a register or integer literal",
            found: format!("{other:?}"),
        }),
    }
}

fn expect(
    tokens: &[Token],
    at: usize,
    want: Token,
    line: usize,
    label: &'static str,
) -> Result<(), ParseError> {
    match tokens.get(at) {
        Some(t) if *t == want => Ok(()),
        other => Err(ParseError::UnexpectedToken {
            line,
            expected: label,
            found: format!("{other:?}"),
        }),
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find(';') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Label(usize),
    Reg(u32),
    Int(u32),
    Br,
    Print,
    Colon,
    Comma,
    Plus,
    Arrow,
}

fn lex_line(line: usize, text: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }
        match c {
            ':' => {
                tokens.push(Token::Colon);
                i += 1;
            }
            ',' => {
                tokens.push(Token::Comma);
                i += 1;
            }
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '<' => {
                if chars.get(i + 1) == Some(&'-') {
                    tokens.push(Token::Arrow);
                    i += 2;
                } else {
                    return Err(ParseError::UnexpectedChar { line, found: c });
                }
            }
            '.' => {
                let (n, consumed) = lex_uint(&chars[i + 1..], line)?;
                tokens.push(Token::Label(n as usize));
                i += 1 + consumed;
            }
            '%' => {
                let (n, consumed) = lex_uint(&chars[i + 1..], line)?;
                tokens.push(Token::Reg(n));
                i += 1 + consumed;
            }
            c if c.is_ascii_digit() => {
                let (n, consumed) = lex_uint(&chars[i..], line)?;
                tokens.push(Token::Int(n));
                i += consumed;
            }
            c if c.is_ascii_alphabetic() => {
                let start = i;
                while i < chars.len() && chars[i].is_ascii_alphanumeric() {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                match word.as_str() {
                    "BR" => tokens.push(Token::Br),
                    "PRINT" => tokens.push(Token::Print),
                    _ => {
                        return Err(ParseError::UnexpectedToken {
                            line,
                            expected: "'BR' or 'PRINT'",
                            found: word,
                        })
                    }
                }
            }
            _ => return Err(ParseError::UnexpectedChar { line, found: c }),
        }
    }
    Ok(tokens)
}

/// Lex a run of ASCII digits starting at `chars[0]`. Returns the parsed
/// value and the number of characters consumed.
fn lex_uint(chars: &[char], line: usize) -> Result<(u32, usize), ParseError> {
    let mut end = 0;
    while end < chars.len() && chars[end].is_ascii_digit() {
        end += 1;
    }
    if end == 0 {
        return Err(ParseError::UnexpectedEof {
            expected: "a digit",
        });
    }
    let text: String = chars[..end].iter().collect();
    let value: u32 = text.parse().map_err(|_| ParseError::IntegerOverflow {
        line,
        text: text.clone(),
    })?;
    if value >= 1 << 31 {
        return Err(ParseError::IntegerOverflow { line, text });
    }
    Ok((value, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_straight_line_function() {
        let src = "\
.0:
  %0 <- 1
  BR .1
.1:
  PRINT %0
";
        let cfg = parse_str(src).unwrap();
        assert_eq!(cfg.len(), 2);
        assert_eq!(cfg.block(BlockId(0)).succs, vec![BlockId(1)]);
        assert_eq!(cfg.block(BlockId(1)).preds, vec![BlockId(0)]);
    }

    #[test]
    fn parses_conditional_branch_and_add() {
        let src = "\
.0:
  %0 <- 1
  BR %0, .1, .2
.1:
  %1 <- %0 + 1
  BR .2
.2:
  PRINT %1
";
        let cfg = parse_str(src).unwrap();
        assert_eq!(cfg.len(), 3);
        assert_eq!(cfg.block(BlockId(0)).succs, vec![BlockId(1), BlockId(2)]);
        assert_eq!(cfg.max_register(), 1);
    }

    #[test]
    fn rejects_out_of_order_labels() {
        let src = ".1:\n  BR .1\n";
        let err = parse_str(src).unwrap_err();
        assert!(matches!(err, ParseError::BlockOutOfOrder { .. }));
    }

    #[test]
    fn rejects_unknown_branch_target() {
        let src = ".0:\n  BR .5\n";
        let err = parse_str(src).unwrap_err();
        assert!(matches!(err, ParseError::UnknownBlock { .. }));
    }

    #[test]
    fn comments_are_stripped() {
        let src = "\
.0: ; entry
  %0 <- 1 ; constant one
  BR .0
";
        let cfg = parse_str(src).unwrap();
        assert_eq!(cfg.len(), 1);
        assert_eq!(cfg.block(BlockId(0)).insts.len(), 2);
    }
}
