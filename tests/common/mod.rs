#![allow(dead_code)]

use std::sync::{Arc, Barrier, Mutex};

use coolprop_calc::{CalcError, PropertyEngine, Result};

/// One recorded engine call, with the exact names and SI values the
/// engine received.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Props {
        output: String,
        name1: String,
        value1: f64,
        name2: String,
        value2: f64,
        fluid: String,
    },
    HaProps {
        output: String,
        name1: String,
        value1: f64,
        name2: String,
        value2: f64,
        name3: String,
        value3: f64,
    },
    Props1 {
        output: String,
        fluid: String,
    },
    Phase {
        name1: String,
        value1: f64,
        name2: String,
        value2: f64,
        fluid: String,
    },
    GlobalParam(String),
    FluidParam {
        fluid: String,
        param: String,
    },
}

type Responder = Arc<dyn Fn(&Call) -> f64 + Send + Sync>;
type Diagnoser = Arc<dyn Fn(&Call) -> String + Send + Sync>;

/// Scripted in-memory engine.
///
/// Clones share the call log and the error slot, so a test keeps one
/// handle and gives the other to the `Calculator`.  Like CoolProp's
/// `errstring`, the error slot is one per engine and every failing call
/// overwrites it.
#[derive(Clone)]
pub struct MockEngine {
    calls: Arc<Mutex<Vec<Call>>>,
    value: Responder,
    text: String,
    raise: Option<String>,
    fail: Option<Diagnoser>,
    rendezvous: Option<Arc<Barrier>>,
    panic: bool,
    errstring: Arc<Mutex<Option<String>>>,
}

impl MockEngine {
    /// Every numeric call returns `x`; string calls return `"liquid"`.
    pub fn returning(x: f64) -> Self {
        Self::responding(move |_| x)
    }

    /// Numeric results computed from the recorded call.
    pub fn responding(f: impl Fn(&Call) -> f64 + Send + Sync + 'static) -> Self {
        Self {
            calls: Arc::default(),
            value: Arc::new(f),
            text: "liquid".into(),
            raise: None,
            fail: None,
            rendezvous: None,
            panic: false,
            errstring: Arc::default(),
        }
    }

    pub fn text(mut self, s: &str) -> Self {
        self.text = s.into();
        self
    }

    /// Every call returns `Err(Engine(msg))`.
    pub fn raising(mut self, msg: &str) -> Self {
        self.raise = Some(msg.into());
        self
    }

    /// Every call fails with `EngineFailure(f(call))`, also written to
    /// the shared error slot.
    pub fn failing(mut self, f: impl Fn(&Call) -> String + Send + Sync + 'static) -> Self {
        self.fail = Some(Arc::new(f));
        self
    }

    /// Failing calls wait here after writing the error slot, so every
    /// thread's failure lands before any caller sees its result.
    pub fn rendezvous(mut self, barrier: Arc<Barrier>) -> Self {
        self.rendezvous = Some(barrier);
        self
    }

    pub fn panicking(mut self) -> Self {
        self.panic = true;
        self
    }

    pub fn last_error(self, msg: &str) -> Self {
        *self.errstring.lock().unwrap() = Some(msg.into());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> Call {
        self.calls().pop().expect("engine was not called")
    }

    fn record(&self, call: Call) -> Result<Call> {
        self.calls.lock().unwrap().push(call.clone());
        if self.panic {
            panic!("mock engine panic");
        }
        if let Some(msg) = &self.raise {
            return Err(CalcError::Engine(msg.clone()));
        }
        if let Some(diagnose) = &self.fail {
            let msg = diagnose(&call);
            *self.errstring.lock().unwrap() = Some(msg.clone());
            if let Some(barrier) = &self.rendezvous {
                barrier.wait();
            }
            return Err(CalcError::EngineFailure(msg));
        }
        Ok(call)
    }

    fn number(&self, call: Call) -> Result<f64> {
        let call = self.record(call)?;
        Ok((self.value)(&call))
    }

    fn string(&self, call: Call) -> Result<String> {
        self.record(call)?;
        Ok(self.text.clone())
    }
}

impl PropertyEngine for MockEngine {
    fn props_si(
        &self,
        output: &str,
        name1: &str,
        value1: f64,
        name2: &str,
        value2: f64,
        fluid: &str,
    ) -> Result<f64> {
        self.number(Call::Props {
            output: output.into(),
            name1: name1.into(),
            value1,
            name2: name2.into(),
            value2,
            fluid: fluid.into(),
        })
    }

    fn ha_props_si(
        &self,
        output: &str,
        name1: &str,
        value1: f64,
        name2: &str,
        value2: f64,
        name3: &str,
        value3: f64,
    ) -> Result<f64> {
        self.number(Call::HaProps {
            output: output.into(),
            name1: name1.into(),
            value1,
            name2: name2.into(),
            value2,
            name3: name3.into(),
            value3,
        })
    }

    fn props1_si(&self, output: &str, fluid: &str) -> Result<f64> {
        self.number(Call::Props1 {
            output: output.into(),
            fluid: fluid.into(),
        })
    }

    fn phase_si(
        &self,
        name1: &str,
        value1: f64,
        name2: &str,
        value2: f64,
        fluid: &str,
    ) -> Result<String> {
        self.string(Call::Phase {
            name1: name1.into(),
            value1,
            name2: name2.into(),
            value2,
            fluid: fluid.into(),
        })
    }

    fn global_param(&self, param: &str) -> Result<String> {
        self.string(Call::GlobalParam(param.into()))
    }

    fn fluid_param(&self, fluid: &str, param: &str) -> Result<String> {
        self.string(Call::FluidParam {
            fluid: fluid.into(),
            param: param.into(),
        })
    }

    fn last_error(&self) -> Option<String> {
        self.errstring.lock().unwrap().clone()
    }
}
