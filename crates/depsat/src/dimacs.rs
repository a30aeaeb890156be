//! Textual DIMACS interchange.
//!
//! The export writes the encoded problem as conventional DIMACS CNF so
//! an external SAT solver can stand in for the internal search; the
//! parser reads that solver's model back into the variable store.
//! Variable orders are the 1-based variable ids, assigned by walking
//! the variable array.

use std::io;

use thiserror::Error;

use crate::solver::{lit_var, Literal, SatProblem};

/// Failures while reading an external solver's output.
#[derive(Debug, Error)]
pub enum ModelParseError {
    #[error("line {line}: unexpected token {token:?} in solver output")]
    UnexpectedToken { line: usize, token: String },

    #[error("solver output ended before the terminating 0")]
    UnterminatedModel,

    #[error("external solver reported the problem unsatisfiable")]
    Unsatisfiable,

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl SatProblem {
    /// Write the problem as DIMACS CNF: a `p cnf` header followed by
    /// one space-separated, zero-terminated line per clause.
    pub fn write_dimacs(&self, target: &mut impl io::Write) -> io::Result<()> {
        writeln!(target, "p cnf {} {}", self.num_vars(), self.num_clauses())?;
        let mut buf = itoa::Buffer::new();
        for clause in self.clauses.iter() {
            for &lit in clause.literals() {
                target.write_all(buf.format(lit).as_bytes())?;
                target.write_all(b" ")?;
            }
            target.write_all(b"0\n")?;
        }
        Ok(())
    }

    /// Parse an external solver's model and apply it to the variable
    /// store.
    ///
    /// A negative value clears `to_install`, a positive one sets it;
    /// orders outside the problem are ignored. Variables the model
    /// does not mention stay unresolved and fail the later
    /// [projection](SatProblem::project).
    pub fn apply_model(&mut self, source: impl io::Read) -> Result<(), ModelParseError> {
        for lit in parse_model(source)? {
            let var = lit_var(lit);
            if var >= 1 && var <= self.num_vars() as i32 {
                self.vars.var_mut(var).set(lit > 0);
            }
        }
        Ok(())
    }
}

/// Read a model in either accepted output style: a `SAT` line followed
/// by whitespace-separated literals, or `v `-prefixed value lines.
/// Both are terminated by a literal `0`. An explicit `UNSAT` (or
/// `s UNSATISFIABLE`) verdict is reported as its own error.
pub fn parse_model(source: impl io::Read) -> Result<Vec<Literal>, ModelParseError> {
    use io::BufRead;

    let mut values = Vec::new();
    for (index, line) in io::BufReader::new(source).lines().enumerate() {
        let line = line?;
        let mut tokens = line.split_whitespace();
        while let Some(token) = tokens.next() {
            match token {
                // comment line
                "c" => break,
                "s" | "v" | "SAT" | "SATISFIABLE" => continue,
                "UNSAT" | "UNSATISFIABLE" => return Err(ModelParseError::Unsatisfiable),
                _ => match token.parse::<Literal>() {
                    Ok(0) => return Ok(values),
                    Ok(lit) => values.push(lit),
                    Err(_) => {
                        return Err(ModelParseError::UnexpectedToken {
                            line: index + 1,
                            token: token.to_string(),
                        })
                    }
                },
            }
        }
    }
    Err(ModelParseError::UnterminatedModel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::Candidate;
    use crate::request::{JobKind, Request};
    use crate::solver::Solver;
    use crate::universe::Universe;

    fn two_package_problem() -> (Universe, Request) {
        let mut universe = Universe::new();
        let a = universe.add_candidate(Candidate::remote("a", "d1").depends_on("b"));
        universe.add_candidate(Candidate::remote("b", "d2"));

        let mut request = Request::new(JobKind::Install);
        request.add_install(a);
        (universe, request)
    }

    #[test]
    fn test_write_dimacs() -> anyhow::Result<()> {
        let (universe, request) = two_package_problem();
        let problem = Solver::new(&universe).encode(&request);

        let mut out = Vec::new();
        problem.write_dimacs(&mut out)?;

        let text = String::from_utf8(out)?;
        assert_eq!(text, "p cnf 2 2\n-1 2 0\n1 0\n");
        Ok(())
    }

    #[test]
    fn test_parse_competition_style() -> anyhow::Result<()> {
        let model = parse_model(b"SAT\n1 -2 3 0\n" as &[_])?;
        assert_eq!(model, vec![1, -2, 3]);
        Ok(())
    }

    #[test]
    fn test_parse_value_lines() -> anyhow::Result<()> {
        let model = parse_model(b"c a comment\ns SATISFIABLE\nv 1 -2\nv 3 0\n" as &[_])?;
        assert_eq!(model, vec![1, -2, 3]);
        Ok(())
    }

    #[test]
    fn test_parse_unsat_verdict() {
        let err = parse_model(b"UNSAT\n" as &[_]).unwrap_err();
        assert!(matches!(err, ModelParseError::Unsatisfiable));

        let err = parse_model(b"s UNSATISFIABLE\n" as &[_]).unwrap_err();
        assert!(matches!(err, ModelParseError::Unsatisfiable));
    }

    #[test]
    fn test_parse_truncated_model() {
        let err = parse_model(b"SAT\n1 -2 3\n" as &[_]).unwrap_err();
        assert!(matches!(err, ModelParseError::UnterminatedModel));
    }

    #[test]
    fn test_parse_garbage_token() {
        let err = parse_model(b"SAT\n1 two 0\n" as &[_]).unwrap_err();
        match err {
            ModelParseError::UnexpectedToken { line, token } => {
                assert_eq!(line, 2);
                assert_eq!(token, "two");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_apply_model_ignores_unknown_orders() -> anyhow::Result<()> {
        let (universe, request) = two_package_problem();
        let mut problem = Solver::new(&universe).encode(&request);

        problem.apply_model(b"SAT\n1 2 99 -100 0\n" as &[_])?;
        assert!(problem.vars.var(1).to_install());
        assert!(problem.vars.var(2).to_install());
        Ok(())
    }

    #[test]
    fn test_apply_model_negative_clears() -> anyhow::Result<()> {
        let (universe, request) = two_package_problem();
        let mut problem = Solver::new(&universe).encode(&request);

        problem.apply_model(b"SAT\n-1 -2 0\n" as &[_])?;
        assert!(problem.vars.var(1).is_resolved());
        assert!(!problem.vars.var(1).to_install());
        assert!(!problem.vars.var(2).to_install());
        Ok(())
    }
}
