use std::{rc::Rc, sync::{Arc, RwLock}};

use termcolor::Buffer;

use crate::eval::prelude::EvalWarning;
use super::diagnostic::{Diagnostic, Label, Level, Location, INPUT_NAME};

pub trait WarningEmitterIO {
    fn emit_warning(&self, warning: Warning);
}

/// Keeps every warning in memory until taken. Used to hand the soft
/// diagnostics of a line back to the caller.
#[derive(Debug, Default, Clone)]
pub struct VectorWarningEmitterIO {
    pub warnings: Arc<RwLock<Vec<Warning>>>
}

impl VectorWarningEmitterIO {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<Warning> {
        let mut warnings = self.write_lock();
        std::mem::take(&mut *warnings)
    }

    pub fn len(&self) -> usize {
        self.warnings.read().expect("Vector lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn write_lock(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Warning>> {
        self.warnings.write().expect("Vector lock poisoned")
    }
}

impl WarningEmitterIO for VectorWarningEmitterIO {
    fn emit_warning(&self, warning: Warning) {
        let mut warnings = self.write_lock();

        warnings.push(warning);
    }
}

pub struct WarningEmitter {
    emitter: Rc<dyn WarningEmitterIO>
}

impl WarningEmitter {
    pub fn new(emitter: Rc<dyn WarningEmitterIO>) -> Self {
        Self { emitter }
    }

    pub fn emit(&self, warning: Warning) {
        self.emitter.emit_warning(warning);
    }
}

/// Attaches the evaluated line to evaluator warnings so they can be
/// rendered with a source snippet.
pub struct EvalWarningEmitter {
    src: String,
    emitter: WarningEmitter,
}

impl EvalWarningEmitter {
    pub fn new(src: String, emitter: WarningEmitter) -> Self {
        Self { src, emitter }
    }

    pub fn emit(&self, warning: EvalWarning) {
        self.emitter.emit(Warning::Eval {
            src: self.src.clone(),
            warning,
        });
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    Eval {
        src: String,
        warning: EvalWarning
    }
}

impl Warning {
    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();
        self.pretty(&mut nocolor);
        String::from_utf8(nocolor.into_inner()).expect("Warning printing produced invalid utf8")
    }

    pub fn pretty(&self, buf: &mut Buffer) {
        use std::io::Write;

        self.to_diagnostic().write(buf);
        buf.write_all(b"\n")
            .expect("warning pretty buffer write space after");
    }

    pub fn to_diagnostic(&self) -> Diagnostic<'_> {
        match self {
            Warning::Eval { src, warning } => {
                let (title, label) = match warning {
                    EvalWarning::UndefinedVariable { name, .. } => (
                        "Undefined variable",
                        format!("`{name}` is not defined, using no value"),
                    ),
                    EvalWarning::DivisionByZero { .. } => (
                        "Division by zero",
                        "divisor evaluates to 0".to_string(),
                    ),
                };

                Diagnostic {
                    title: title.into(),
                    text: "".into(),
                    level: Level::Warning,
                    location: Some(Location {
                        src,
                        name: INPUT_NAME,
                        label: Label {
                            text: Some(label),
                            span: warning.location(),
                        },
                    }),
                }
            }
        }
    }
}
