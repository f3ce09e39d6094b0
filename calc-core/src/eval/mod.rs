pub mod error;

pub mod prelude {
    pub use super::{
        error::*,
        eval,
        evaluate,
        evaluate_with,
        run,
        EvalOptions,
        EvalResult,
        Evaluated
    };
}

#[cfg(test)]
mod tests;

use std::{rc::Rc, sync::{atomic::{AtomicBool, Ordering}, Arc}};

use crate::{
    environment::prelude::{Environment, Value, MAX_INT, MAX_VARIABLES},
    parser::prelude::{parse_line, Assignment, Binary, BinaryOperator, Expression, Program, Statement, Unary, UnaryOperator, While},
    utils::prelude::{Error, EvalWarningEmitter, SrcSpan, VectorWarningEmitterIO, Warning, WarningEmitter, WarningEmitterIO}
};
use self::error::{runtime_error, EvalWarning, RuntimeError, RuntimeErrorType};

/// `None` is the absent value: the expression produced nothing usable.
pub type EvalResult = Result<Option<Value>, RuntimeError>;

/// Caller-side bounds on evaluation. Nothing is bounded by default.
#[derive(Debug, Clone, Default)]
pub struct EvalOptions {
    /// Iterations a single `while` statement may run before failing the line.
    pub max_loop_iterations: Option<usize>,
    /// Checked before every loop iteration; once set the line fails.
    pub interrupt: Option<Arc<AtomicBool>>,
}

/// Outcome of a line that ran to completion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluated {
    pub values: Vec<Value>,
    pub warnings: Vec<EvalWarning>,
}

/// Parses and evaluates one line against `env`, collecting the soft
/// diagnostics alongside the results.
pub fn evaluate(src: &str, env: &mut Environment) -> Result<Evaluated, Error> {
    evaluate_with(src, env, &EvalOptions::default())
}

pub fn evaluate_with(
    src: &str,
    env: &mut Environment,
    options: &EvalOptions
) -> Result<Evaluated, Error> {
    let collected = Rc::new(VectorWarningEmitterIO::new());

    let values = run(src, env, collected.clone(), options)?;

    let warnings = collected.take()
        .into_iter()
        .map(|Warning::Eval { warning, .. }| warning)
        .collect();

    Ok(Evaluated {
        values,
        warnings
    })
}

/// Like [`evaluate_with`], but streams warnings to `warnings` as they occur.
pub fn run(
    src: &str,
    env: &mut Environment,
    warnings: Rc<dyn WarningEmitterIO>,
    options: &EvalOptions
) -> Result<Vec<Value>, Error> {
    let program = match parse_line(src) {
        Ok(program) => program,
        Err(error) => return Err(Error::Parse { src: src.to_string(), error })
    };

    let warnings = EvalWarningEmitter::new(src.to_string(), WarningEmitter::new(warnings));

    eval(&program, env, &warnings, options)
        .map_err(|error| Error::Runtime { src: src.to_string(), error })
}

/// Runs every statement in order. Assignments made before a failing
/// statement stay in `env`.
pub fn eval(
    program: &Program,
    env: &mut Environment,
    warnings: &EvalWarningEmitter,
    options: &EvalOptions
) -> Result<Vec<Value>, RuntimeError> {
    let mut evaluator = Evaluator {
        env,
        warnings,
        options
    };

    let mut values = vec![];

    for statement in &program.statements {
        if let Some(value) = evaluator.eval_statement(statement)? {
            values.push(value);
        }
    }

    Ok(values)
}

struct Evaluator<'a> {
    env: &'a mut Environment,
    warnings: &'a EvalWarningEmitter,
    options: &'a EvalOptions,
}

impl Evaluator<'_> {
    fn eval_statement(&mut self, statement: &Statement) -> EvalResult {
        match statement {
            Statement::Assignment(assignment) => {
                self.eval_assignment(assignment)?;

                Ok(None)
            },
            Statement::IfThen(conditional) => {
                if self.eval_condition(&conditional.condition)? {
                    self.eval_statement(&conditional.resolution)
                } else {
                    Ok(None)
                }
            },
            Statement::IfThenElse(conditional) => {
                if self.eval_condition(&conditional.condition)? {
                    self.eval_statement(&conditional.resolution)
                } else {
                    self.eval_statement(&conditional.alternative)
                }
            },
            Statement::While(loop_) => {
                self.eval_loop(loop_)?;

                Ok(None)
            },
            Statement::Expression(expression) => self.eval_expression(expression)
        }
    }

    fn eval_condition(&mut self, condition: &Expression) -> Result<bool, RuntimeError> {
        Ok(self.eval_expression(condition)?.is_some_and(|value| value.is_truthy()))
    }

    fn eval_assignment(&mut self, assignment: &Assignment) -> Result<(), RuntimeError> {
        let value = self.eval_expression(&assignment.value)?;
        let name = &assignment.identifier.value;

        if !self.env.contains(name) && self.env.is_full() {
            return runtime_error(
                RuntimeErrorType::TooManyVariables { limit: MAX_VARIABLES },
                assignment.location
            );
        }

        self.env.set(name.clone(), value);

        Ok(())
    }

    fn eval_loop(&mut self, loop_: &While) -> Result<(), RuntimeError> {
        let mut iterations = 0usize;

        while self.eval_condition(&loop_.condition)? {
            if self.is_interrupted() {
                return runtime_error(RuntimeErrorType::Interrupted, loop_.location);
            }

            if let Some(limit) = self.options.max_loop_iterations {
                if iterations >= limit {
                    return runtime_error(RuntimeErrorType::LoopLimitExceeded { limit }, loop_.location);
                }
            }

            iterations += 1;

            for statement in &loop_.body {
                self.eval_statement(statement)?;
            }
        }

        Ok(())
    }

    fn is_interrupted(&self) -> bool {
        self.options.interrupt.as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    fn eval_expression(&mut self, expression: &Expression) -> EvalResult {
        match expression {
            Expression::Number(number) => Ok(Some(Value::from(number.value))),
            Expression::Variable(ident) => match self.env.get(&ident.value) {
                Some(value) => Ok(value),
                None => {
                    self.warnings.emit(EvalWarning::UndefinedVariable {
                        name: ident.value.clone(),
                        location: ident.location
                    });

                    Ok(None)
                }
            },
            Expression::Unary(unary) => self.eval_prefix(unary),
            Expression::Binary(binary) => self.eval_infix(binary)
        }
    }

    fn eval_prefix(&mut self, unary: &Unary) -> EvalResult {
        let Some(operand) = self.eval_expression(&unary.operand)? else {
            return Ok(None);
        };

        match unary.operator {
            UnaryOperator::Negate => match operand.as_integer().checked_neg() {
                Some(value) => Ok(Some(Value::from(value))),
                None => runtime_error(RuntimeErrorType::Overflow, unary.location)
            }
        }
    }

    fn eval_infix(&mut self, infix: &Binary) -> EvalResult {
        let left = self.eval_expression(&infix.left)?;
        let right = self.eval_expression(&infix.right)?;

        let (Some(left), Some(right)) = (left, right) else {
            return Ok(None);
        };

        let (left, right) = (left.as_integer(), right.as_integer());

        let result = match infix.operator {
            BinaryOperator::Add => left.checked_add(right),
            BinaryOperator::Sub => left.checked_sub(right),
            BinaryOperator::Mul => left.checked_mul(right),
            BinaryOperator::Div => {
                if right == 0 {
                    self.warnings.emit(EvalWarning::DivisionByZero {
                        location: infix.right.location()
                    });

                    return Ok(None);
                }

                floor_div(left, right)
            },
            BinaryOperator::Greater => return Ok(Some(Value::from(left > right))),
            BinaryOperator::Less => return Ok(Some(Value::from(left < right))),
            BinaryOperator::Equal => return Ok(Some(Value::from(left == right))),
        };

        check_overflow(result, infix.location).map(|value| Some(Value::from(value)))
    }
}

/// Integer division rounding toward negative infinity.
fn floor_div(left: i64, right: i64) -> Option<i64> {
    let quotient = left.checked_div(right)?;

    if left % right != 0 && (left < 0) != (right < 0) {
        quotient.checked_sub(1)
    } else {
        Some(quotient)
    }
}

fn check_overflow(result: Option<i64>, location: SrcSpan) -> Result<i64, RuntimeError> {
    match result {
        Some(value) if (-MAX_INT..=MAX_INT).contains(&value) => Ok(value),
        _ => runtime_error(RuntimeErrorType::Overflow, location)
    }
}
