//! Lexer and recursive descent parser for path data strings.

use std::fmt;
use std::iter::Enumerate;
use std::str;
use std::str::Bytes;

use crate::path_builder::*;

#[derive(Debug, PartialEq, Copy, Clone)]
pub enum Token {
    Number(f64),
    Flag(bool),
    Command(u8),
    Comma,
}

use self::Token::{Comma, Command, Flag, Number};

#[derive(Debug, PartialEq, Copy, Clone)]
pub enum LexError {
    ParseFloatError,
    UnexpectedByte(u8),
    UnexpectedEof,
}

#[derive(Debug)]
pub struct Lexer<'a> {
    input: &'a [u8],
    iter: Enumerate<Bytes<'a>>,
    current: Option<(usize, u8)>,
    flags_required: u8,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Lexer<'a> {
        let mut iter = input.bytes().enumerate();
        let current = iter.next();

        Lexer {
            input: input.as_bytes(),
            iter,
            current,
            flags_required: 0,
        }
    }

    // Nothing distinguishes a flag from a number without grammar context;
    // the only place flags appear is after the rotation value of an
    // elliptical arc, where exactly two of them must follow.  The parser
    // calls this at that point, and the next two digit bytes (0 or 1 only,
    // with optional whitespace or commas around them) come back as Flag
    // tokens instead of being glued together into numbers.
    pub fn require_flags(&mut self) {
        self.flags_required = 2;
    }

    fn current_pos(&self) -> usize {
        match self.current {
            Some((pos, _)) => pos,
            None => self.input.len(),
        }
    }

    fn advance(&mut self) {
        self.current = self.iter.next();
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.current, Some((_, b)) if b.is_ascii_whitespace()) {
            self.advance();
        }
    }

    fn eat(&mut self, needle: u8) -> bool {
        match self.current {
            Some((_, b)) if b == needle => {
                self.advance();
                true
            }
            _ => false,
        }
    }

    fn eat_digits(&mut self) -> bool {
        let mut any = false;

        while matches!(self.current, Some((_, b)) if b.is_ascii_digit()) {
            any = true;
            self.advance();
        }

        any
    }

    // Sign, integer part, optional decimal point, fraction.  True if there
    // was at least one digit.
    fn eat_significand(&mut self) -> bool {
        let _ = self.eat(b'-') || self.eat(b'+');
        let int_digits = self.eat_digits();
        let _ = self.eat(b'.');
        self.eat_digits() || int_digits
    }

    fn match_number(&mut self) -> Result<Token, LexError> {
        let start = self.current_pos();

        if !self.eat_significand() && self.current_pos() != start {
            // consumed a sign or a dot with no digits after it
            return match self.current {
                Some((_, b)) => Err(LexError::UnexpectedByte(b)),
                None => Err(LexError::UnexpectedEof),
            };
        }

        if self.eat(b'e') || self.eat(b'E') {
            let _ = self.eat(b'-') || self.eat(b'+');
            let _ = self.eat_digits();
        }

        let end = self.current_pos();

        // the scan above only accepts ascii bytes, so the range is valid UTF-8
        let text = str::from_utf8(&self.input[start..end]).map_err(|_| LexError::ParseFloatError)?;
        match text.parse::<f64>() {
            Ok(n) => Ok(Number(n)),
            Err(_) => Err(LexError::ParseFloatError),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = (usize, Result<Token, LexError>);

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_whitespace();

        let (pos, b) = self.current?;

        match b {
            b',' => {
                self.advance();
                Some((pos, Ok(Comma)))
            }

            b if b.is_ascii_alphabetic() => {
                self.advance();
                Some((pos, Ok(Command(b))))
            }

            b'0' | b'1' if self.flags_required > 0 => {
                self.flags_required -= 1;
                self.advance();
                Some((pos, Ok(Flag(b == b'1'))))
            }

            b if self.flags_required > 0 && b.is_ascii_digit() => {
                Some((pos, Err(LexError::UnexpectedByte(b))))
            }

            b if b.is_ascii_digit() || b == b'-' || b == b'+' || b == b'.' => {
                Some((pos, self.match_number()))
            }

            _ => {
                self.advance();
                Some((pos, Err(LexError::UnexpectedByte(b))))
            }
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum ErrorKind {
    UnexpectedToken(Token),
    UnexpectedCommand(u8),
    UnexpectedEof,
    LexError(LexError),
}

use self::ErrorKind::*;

// Failure while reading path data, with the byte offset it happened at.
#[derive(Debug, PartialEq)]
pub struct ParseError {
    pub position: usize,
    pub kind: ErrorKind,
}

impl ParseError {
    fn new(position: usize, kind: ErrorKind) -> ParseError {
        ParseError { position, kind }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            UnexpectedToken(_) => "unexpected token",
            UnexpectedCommand(_) => "unexpected command",
            UnexpectedEof => "unexpected end of data",
            LexError(_) => "error processing token",
        };

        write!(f, "error at position {}: {}", self.position, what)
    }
}

// Recursive descent parser over the lexer's tokens, following the grammar in
// https://www.w3.org/TR/SVG/paths.html#PathDataBNF
//
// Commas may separate any two arguments and are otherwise insignificant, so
// "M 10 20 30 40", "M 10,20 30,40" and "M10,20,30,40" all read the same.
// Whitespace is only needed where two numbers would otherwise run together;
// "M.1-2,3E2-4" is a moveto followed by an implicit lineto.
pub struct PathParser<'a> {
    lexer: Lexer<'a>,
    lookahead: Option<(usize, Result<Token, LexError>)>,

    builder: &'a mut PathBuilder,

    // current point, updated by every emitted command
    current_x: f64,
    current_y: f64,

    // control points that S and T reflect around the current point; these
    // collapse to the current point whenever the previous command was not a
    // curve of the matching kind
    cubic_reflection_x: f64,
    cubic_reflection_y: f64,
    quadratic_reflection_x: f64,
    quadratic_reflection_y: f64,

    // where the current subpath started, for closepath
    subpath_start_x: f64,
    subpath_start_y: f64,
}

impl<'a> PathParser<'a> {
    pub fn new(builder: &'a mut PathBuilder, path_str: &'a str) -> PathParser<'a> {
        let mut lexer = Lexer::new(path_str);
        let lookahead = lexer.next();

        PathParser {
            lexer,
            lookahead,

            builder,

            current_x: 0.0,
            current_y: 0.0,

            cubic_reflection_x: 0.0,
            cubic_reflection_y: 0.0,
            quadratic_reflection_x: 0.0,
            quadratic_reflection_y: 0.0,

            subpath_start_x: 0.0,
            subpath_start_y: 0.0,
        }
    }

    // Parses the whole of the data handed to new().  Empty data is valid
    // and yields an empty path.
    pub fn parse(&mut self) -> Result<(), ParseError> {
        if self.lookahead.is_none() {
            return Ok(());
        }

        self.moveto_drawto_command_groups()
    }

    // Converts the lookahead token with `accept`, without advancing the
    // stream.  A declined token, a lex error, and the end of input all turn
    // into a ParseError carrying the offset they occurred at, so a caller
    // that fails to match one kind of token can still try another.
    fn current_token_as<T>(
        &self,
        accept: impl FnOnce(&Token) -> Option<T>,
    ) -> Result<T, ParseError> {
        match &self.lookahead {
            Some((pos, Ok(t))) => match accept(t) {
                Some(v) => Ok(v),
                None => Err(ParseError::new(*pos, UnexpectedToken(*t))),
            },
            Some((pos, Err(e))) => Err(ParseError::new(*pos, LexError(*e))),
            None => Err(ParseError::new(self.lexer.input.len(), UnexpectedEof)),
        }
    }

    fn advance_token(&mut self) {
        self.lookahead = self.lexer.next();
    }

    fn match_command(&mut self) -> Result<u8, ParseError> {
        let c = self.current_token_as(|t| match t {
            Command(c) => Some(*c),
            _ => None,
        })?;
        self.advance_token();
        Ok(c)
    }

    fn match_number(&mut self) -> Result<f64, ParseError> {
        let n = self.current_token_as(|t| match t {
            Number(n) => Some(*n),
            _ => None,
        })?;
        self.advance_token();
        Ok(n)
    }

    fn match_comma(&mut self) -> Result<(), ParseError> {
        self.current_token_as(|t| match t {
            Comma => Some(()),
            _ => None,
        })?;
        self.advance_token();
        Ok(())
    }

    fn match_flag(&mut self) -> Result<bool, ParseError> {
        let f = self.current_token_as(|t| match t {
            Flag(f) => Some(*f),
            _ => None,
        })?;
        self.advance_token();
        Ok(f)
    }

    fn eat_optional_comma(&mut self) {
        let _ = self.match_comma();
    }

    // like match_number, with an optional comma before the number
    fn match_comma_number(&mut self) -> Result<f64, ParseError> {
        self.eat_optional_comma();
        self.match_number()
    }

    // The lexer has to switch into flag mode before the rotation number's
    // token is consumed, or it would lex the flag bytes as one ordinary
    // number.  Hence this reads all three at once instead of letting the
    // arc production call match_number itself.
    fn match_number_and_flags(&mut self) -> Result<(f64, bool, bool), ParseError> {
        let n = self.current_token_as(|t| match t {
            Number(n) => Some(*n),
            _ => None,
        })?;
        self.lexer.require_flags();
        self.advance_token();

        self.eat_optional_comma();
        let f1 = self.match_flag()?;

        self.eat_optional_comma();
        let f2 = self.match_flag()?;

        Ok((n, f1, f2))
    }

    fn peek_command(&self) -> Option<u8> {
        match self.lookahead {
            Some((_, Ok(Command(c)))) => Some(c),
            _ => None,
        }
    }

    fn peek_number(&self) -> Option<f64> {
        match self.lookahead {
            Some((_, Ok(Number(n)))) => Some(n),
            _ => None,
        }
    }

    fn error(&self, kind: ErrorKind) -> ParseError {
        let position = match self.lookahead {
            Some((pos, _)) => pos,
            None => 0,
        };

        ParseError { position, kind }
    }

    fn coordinate_pair(&mut self) -> Result<(f64, f64), ParseError> {
        Ok((self.match_number()?, self.match_comma_number()?))
    }

    // Reads a coordinate pair, translating it by the current point when the
    // surrounding command is relative.
    fn absolute_pair(&mut self, absolute: bool) -> Result<(f64, f64), ParseError> {
        let (mut x, mut y) = self.coordinate_pair()?;

        if !absolute {
            x += self.current_x;
            y += self.current_y;
        }

        Ok((x, y))
    }

    fn set_current_point(&mut self, x: f64, y: f64) {
        self.current_x = x;
        self.current_y = y;

        self.cubic_reflection_x = x;
        self.cubic_reflection_y = y;
        self.quadratic_reflection_x = x;
        self.quadratic_reflection_y = y;
    }

    fn set_cubic_reflection_and_current_point(&mut self, x3: f64, y3: f64, x4: f64, y4: f64) {
        self.set_current_point(x4, y4);

        self.cubic_reflection_x = x3;
        self.cubic_reflection_y = y3;
    }

    fn set_quadratic_reflection_and_current_point(&mut self, x2: f64, y2: f64, x3: f64, y3: f64) {
        self.set_current_point(x3, y3);

        self.quadratic_reflection_x = x2;
        self.quadratic_reflection_y = y2;
    }

    fn emit_move_to(&mut self, x: f64, y: f64) {
        self.set_current_point(x, y);

        self.subpath_start_x = x;
        self.subpath_start_y = y;

        self.builder.move_to(x, y);
    }

    fn emit_line_to(&mut self, x: f64, y: f64) {
        self.set_current_point(x, y);

        self.builder.line_to(x, y);
    }

    fn emit_curve_to(&mut self, x2: f64, y2: f64, x3: f64, y3: f64, x4: f64, y4: f64) {
        self.set_cubic_reflection_and_current_point(x3, y3, x4, y4);

        self.builder.curve_to(x2, y2, x3, y3, x4, y4);
    }

    fn emit_quadratic_curve_to(&mut self, x2: f64, y2: f64, x3: f64, y3: f64) {
        self.set_quadratic_reflection_and_current_point(x2, y2, x3, y3);

        self.builder.quadratic_curve_to(x2, y2, x3, y3);
    }

    fn emit_arc(
        &mut self,
        rx: f64,
        ry: f64,
        x_axis_rotation: f64,
        large_arc: LargeArc,
        sweep: Sweep,
        x: f64,
        y: f64,
    ) {
        let (from_x, from_y) = (self.current_x, self.current_y);

        self.set_current_point(x, y);

        self.builder
            .arc(from_x, from_y, rx, ry, x_axis_rotation, large_arc, sweep, x, y);
    }

    fn emit_close_path(&mut self) {
        let (x, y) = (self.subpath_start_x, self.subpath_start_y);
        self.set_current_point(x, y);

        self.builder.close_path();
    }

    fn moveto_drawto_command_groups(&mut self) -> Result<(), ParseError> {
        loop {
            self.moveto()?;
            self.drawto_commands()?;

            if self.lookahead.is_none() {
                return Ok(());
            }
        }
    }

    fn moveto(&mut self) -> Result<(), ParseError> {
        match self.match_command()? {
            b'M' => self.moveto_argument_sequence(true),
            b'm' => self.moveto_argument_sequence(false),
            c => Err(self.error(UnexpectedCommand(c))),
        }
    }

    fn moveto_argument_sequence(&mut self, absolute: bool) -> Result<(), ParseError> {
        let (x, y) = self.absolute_pair(absolute)?;

        self.emit_move_to(x, y);

        // any further coordinates are implicit linetos
        if self.match_comma().is_ok() || self.peek_number().is_some() {
            self.lineto_argument_sequence(absolute)
        } else {
            Ok(())
        }
    }

    fn drawto_commands(&mut self) -> Result<(), ParseError> {
        while self.drawto_command()? {}

        Ok(())
    }

    // Consumes the next command token unless it is a moveto, which ends the
    // current group.  Lowercase commands are the relative variants.
    fn take_drawto_command(&mut self) -> Option<(u8, bool)> {
        match self.peek_command() {
            None | Some(b'M') | Some(b'm') => None,
            Some(c) => {
                let _ = self.match_command();
                Some((c.to_ascii_uppercase(), c.is_ascii_uppercase()))
            }
        }
    }

    fn drawto_command(&mut self) -> Result<bool, ParseError> {
        let (command, absolute) = match self.take_drawto_command() {
            Some(c) => c,
            None => return Ok(false),
        };

        match command {
            b'Z' => self.emit_close_path(),
            b'L' => self.lineto_argument_sequence(absolute)?,
            b'H' => self.horizontal_lineto_argument_sequence(absolute)?,
            b'V' => self.vertical_lineto_argument_sequence(absolute)?,
            b'C' => self.curveto_argument_sequence(absolute)?,
            b'S' => self.smooth_curveto_argument_sequence(absolute)?,
            b'Q' => self.quadratic_curveto_argument_sequence(absolute)?,
            b'T' => self.smooth_quadratic_curveto_argument_sequence(absolute)?,
            b'A' => self.elliptical_arc_argument_sequence(absolute)?,
            _ => return Ok(false),
        }

        Ok(true)
    }

    // An argument sequence continues after a comma, and also whenever the
    // next token is another number.
    fn end_of_arg_sequence(&mut self) -> bool {
        !(self.match_comma().is_ok() || self.peek_number().is_some())
    }

    fn lineto_argument_sequence(&mut self, absolute: bool) -> Result<(), ParseError> {
        loop {
            let (x, y) = self.absolute_pair(absolute)?;

            self.emit_line_to(x, y);

            if self.end_of_arg_sequence() {
                return Ok(());
            }
        }
    }

    fn horizontal_lineto_argument_sequence(&mut self, absolute: bool) -> Result<(), ParseError> {
        loop {
            let mut x = self.match_number()?;

            if !absolute {
                x += self.current_x;
            }

            self.emit_line_to(x, self.current_y);

            if self.end_of_arg_sequence() {
                return Ok(());
            }
        }
    }

    fn vertical_lineto_argument_sequence(&mut self, absolute: bool) -> Result<(), ParseError> {
        loop {
            let mut y = self.match_number()?;

            if !absolute {
                y += self.current_y;
            }

            self.emit_line_to(self.current_x, y);

            if self.end_of_arg_sequence() {
                return Ok(());
            }
        }
    }

    fn curveto_argument_sequence(&mut self, absolute: bool) -> Result<(), ParseError> {
        loop {
            let (x2, y2) = self.absolute_pair(absolute)?;

            self.eat_optional_comma();
            let (x3, y3) = self.absolute_pair(absolute)?;

            self.eat_optional_comma();
            let (x4, y4) = self.absolute_pair(absolute)?;

            self.emit_curve_to(x2, y2, x3, y3, x4, y4);

            if self.end_of_arg_sequence() {
                return Ok(());
            }
        }
    }

    fn smooth_curveto_argument_sequence(&mut self, absolute: bool) -> Result<(), ParseError> {
        loop {
            let (x3, y3) = self.absolute_pair(absolute)?;

            self.eat_optional_comma();
            let (x4, y4) = self.absolute_pair(absolute)?;

            // first control point is the previous one, reflected
            let x2 = 2.0 * self.current_x - self.cubic_reflection_x;
            let y2 = 2.0 * self.current_y - self.cubic_reflection_y;

            self.emit_curve_to(x2, y2, x3, y3, x4, y4);

            if self.end_of_arg_sequence() {
                return Ok(());
            }
        }
    }

    fn quadratic_curveto_argument_sequence(&mut self, absolute: bool) -> Result<(), ParseError> {
        loop {
            let (x2, y2) = self.absolute_pair(absolute)?;

            self.eat_optional_comma();
            let (x3, y3) = self.absolute_pair(absolute)?;

            self.emit_quadratic_curve_to(x2, y2, x3, y3);

            if self.end_of_arg_sequence() {
                return Ok(());
            }
        }
    }

    fn smooth_quadratic_curveto_argument_sequence(
        &mut self,
        absolute: bool,
    ) -> Result<(), ParseError> {
        loop {
            let (x3, y3) = self.absolute_pair(absolute)?;

            let x2 = 2.0 * self.current_x - self.quadratic_reflection_x;
            let y2 = 2.0 * self.current_y - self.quadratic_reflection_y;

            self.emit_quadratic_curve_to(x2, y2, x3, y3);

            if self.end_of_arg_sequence() {
                return Ok(());
            }
        }
    }

    fn elliptical_arc_argument_sequence(&mut self, absolute: bool) -> Result<(), ParseError> {
        loop {
            let rx = self.match_number()?.abs();
            let ry = self.match_comma_number()?.abs();

            self.eat_optional_comma();
            let (x_axis_rotation, f1, f2) = self.match_number_and_flags()?;

            let large_arc = LargeArc(f1);
            let sweep = if f2 { Sweep::Positive } else { Sweep::Negative };

            self.eat_optional_comma();
            let (x, y) = self.absolute_pair(absolute)?;

            self.emit_arc(rx, ry, x_axis_rotation, large_arc, sweep, x, y);

            if self.end_of_arg_sequence() {
                return Ok(());
            }
        }
    }
}
