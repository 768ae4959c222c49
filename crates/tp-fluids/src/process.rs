//! Process path engine.
//!
//! A path is a sequence of states between an initial (T, P) and a final value
//! of the swept variable. Each process type holds one property fixed, sweeps
//! another and resolves the rest through the oracle:
//!
//! | process     | held            | swept | state queried        |
//! |-------------|-----------------|-------|----------------------|
//! | Isobaric    | P₀              | T     | (T, P₀)              |
//! | Isothermal  | T₀              | P     | (T₀, P)              |
//! | Isochoric   | D(T₀, P₀)       | T     | (T, D₀)              |
//! | Isenthalpic | H(T₀, P₀)       | P     | (P, H₀)              |
//! | Isentropic  | S(T₀, P₀)       | P     | (P, S₀)              |
//! | Polytropic  | T₀·(P/P₀)^((n−1)/n) | P | (T, P)               |
//!
//! Samples are independent of each other. A sample whose state cannot be
//! resolved keeps its swept and held inputs, every derived value becomes NaN
//! and its phase becomes [`Phase::Unknown`]; the remaining samples still run.

use crate::error::{FluidError, FluidResult};
use crate::oracle::{Param, Phase, PropertyOracle, StateSpec};
use crate::results::ProcessPathResult;
use crate::sweeps::SampleSpacing;
use rayon::prelude::*;
use std::fmt;
use std::str::FromStr;
use tp_core::units::{Pressure, Temperature, k_of, pa_of};
use tracing::debug;

/// Samples along a path when the caller does not say otherwise.
pub const DEFAULT_NUM_POINTS: usize = 50;

/// Polytropic exponent used when the caller does not say otherwise.
pub const DEFAULT_POLYTROPIC_N: f64 = 1.3;

/// Thermodynamic process followed between the initial and final state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessType {
    Isobaric,
    Isothermal,
    Isochoric,
    Isenthalpic,
    Isentropic,
    Polytropic,
}

impl ProcessType {
    pub const ALL: [ProcessType; 6] = [
        ProcessType::Isobaric,
        ProcessType::Isothermal,
        ProcessType::Isochoric,
        ProcessType::Isenthalpic,
        ProcessType::Isentropic,
        ProcessType::Polytropic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ProcessType::Isobaric => "Isobaric",
            ProcessType::Isothermal => "Isothermal",
            ProcessType::Isochoric => "Isochoric",
            ProcessType::Isenthalpic => "Isenthalpic",
            ProcessType::Isentropic => "Isentropic",
            ProcessType::Polytropic => "Polytropic",
        }
    }

    /// Property swept from its initial value to `final_value`.
    pub fn swept(self) -> Param {
        match self {
            ProcessType::Isobaric | ProcessType::Isochoric => Param::Temperature,
            _ => Param::Pressure,
        }
    }

    /// Property computed once at the initial state and held along the path.
    fn held(self) -> Option<Param> {
        match self {
            ProcessType::Isochoric => Some(Param::Density),
            ProcessType::Isenthalpic => Some(Param::Enthalpy),
            ProcessType::Isentropic => Some(Param::Entropy),
            _ => None,
        }
    }
}

impl fmt::Display for ProcessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProcessType {
    type Err = FluidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ProcessType::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| FluidError::UnsupportedProcessType {
                process: trimmed.to_string(),
            })
    }
}

/// Everything needed to simulate one process path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathRequest {
    pub fluid: String,
    pub process: ProcessType,
    pub initial_temperature: Temperature,
    pub initial_pressure: Pressure,
    /// Final value of the swept variable, in SI (K or Pa).
    pub final_value: f64,
    pub num_points: usize,
    pub polytropic_n: f64,
    pub spacing: SampleSpacing,
}

impl PathRequest {
    pub fn new(
        fluid: impl Into<String>,
        process: ProcessType,
        initial_temperature: Temperature,
        initial_pressure: Pressure,
        final_value: f64,
    ) -> Self {
        Self {
            fluid: fluid.into(),
            process,
            initial_temperature,
            initial_pressure,
            final_value,
            num_points: DEFAULT_NUM_POINTS,
            polytropic_n: DEFAULT_POLYTROPIC_N,
            spacing: SampleSpacing::default(),
        }
    }

    pub fn with_points(mut self, num_points: usize) -> Self {
        self.num_points = num_points;
        self
    }

    pub fn with_polytropic_n(mut self, n: f64) -> Self {
        self.polytropic_n = n;
        self
    }

    pub fn with_spacing(mut self, spacing: SampleSpacing) -> Self {
        self.spacing = spacing;
        self
    }
}

/// Resolved inputs shared by every sample of one path.
struct PathPlan<'a> {
    fluid: &'a str,
    process: ProcessType,
    t0: f64,
    p0: f64,
    held: f64,
    polytropic_n: f64,
    swept: Vec<f64>,
}

/// One resolved (or degraded) sample.
struct Sample {
    temperature: f64,
    pressure: f64,
    enthalpy: f64,
    entropy: f64,
    density: f64,
    internal_energy: f64,
    quality: f64,
    phase: Phase,
    failed: bool,
}

const OUTPUTS: [Param; 7] = [
    Param::Temperature,
    Param::Pressure,
    Param::Enthalpy,
    Param::Entropy,
    Param::Density,
    Param::InternalEnergy,
    Param::Quality,
];

/// Simulate a process path, one sample after another.
pub fn simulate(oracle: &dyn PropertyOracle, request: &PathRequest) -> FluidResult<ProcessPathResult> {
    let plan = plan(oracle, request)?;
    let mut result = ProcessPathResult::with_len(plan.swept.len());
    for (i, &x) in plan.swept.iter().enumerate() {
        store(&mut result, i, evaluate(oracle, &plan, i, x));
    }
    Ok(result)
}

/// Same output as [`simulate`], with samples evaluated on the rayon pool.
pub fn simulate_par(
    oracle: &dyn PropertyOracle,
    request: &PathRequest,
) -> FluidResult<ProcessPathResult> {
    let plan = plan(oracle, request)?;
    let samples: Vec<Sample> = plan
        .swept
        .par_iter()
        .enumerate()
        .map(|(i, &x)| evaluate(oracle, &plan, i, x))
        .collect();

    let mut result = ProcessPathResult::with_len(samples.len());
    for (i, sample) in samples.into_iter().enumerate() {
        store(&mut result, i, sample);
    }
    Ok(result)
}

fn plan<'a>(oracle: &dyn PropertyOracle, request: &'a PathRequest) -> FluidResult<PathPlan<'a>> {
    if request.num_points == 0 {
        return Err(FluidError::InvalidArg {
            what: "num_points must be at least 1".to_string(),
        });
    }
    let process = request.process;
    let t0 = k_of(request.initial_temperature);
    let p0 = pa_of(request.initial_pressure);

    let start = match process.swept() {
        Param::Temperature => t0,
        _ => p0,
    };
    let swept = request.spacing.points(start, request.final_value, request.num_points);

    let held = match process.held() {
        Some(param) => oracle
            .query(param, StateSpec::tp(t0, p0), &request.fluid)
            .unwrap_or_else(|e| {
                debug!(
                    fluid = %request.fluid,
                    %process,
                    property = %param,
                    error = %e,
                    "held value unavailable at initial state"
                );
                f64::NAN
            }),
        None => f64::NAN,
    };

    Ok(PathPlan {
        fluid: &request.fluid,
        process,
        t0,
        p0,
        held,
        polytropic_n: request.polytropic_n,
        swept,
    })
}

/// Temperature on the polytropic path through (T₀, P₀) at pressure `p`.
///
/// NaN instead of an arithmetic fault when the reference state or the
/// exponent is degenerate.
pub fn polytropic_temperature(t0: f64, p0: f64, p: f64, n: f64) -> f64 {
    if p0 == 0.0 || n == 0.0 || p0.is_nan() || t0.is_nan() || n.is_nan() {
        return f64::NAN;
    }
    t0 * (p / p0).powf((n - 1.0) / n)
}

/// Resolve the state at swept value `x`.
fn evaluate(oracle: &dyn PropertyOracle, plan: &PathPlan<'_>, index: usize, x: f64) -> Sample {
    let mut sample = Sample {
        temperature: f64::NAN,
        pressure: f64::NAN,
        enthalpy: f64::NAN,
        entropy: f64::NAN,
        density: f64::NAN,
        internal_energy: f64::NAN,
        quality: f64::NAN,
        phase: Phase::Unknown,
        failed: false,
    };

    // Inputs of the state, reported even when the state does not resolve.
    let state = match plan.process {
        ProcessType::Isobaric => {
            sample.temperature = x;
            sample.pressure = plan.p0;
            StateSpec::tp(x, plan.p0)
        }
        ProcessType::Isothermal => {
            sample.temperature = plan.t0;
            sample.pressure = x;
            StateSpec::tp(plan.t0, x)
        }
        ProcessType::Isochoric => {
            sample.temperature = x;
            sample.density = plan.held;
            StateSpec::td(x, plan.held)
        }
        ProcessType::Isenthalpic => {
            sample.pressure = x;
            sample.enthalpy = plan.held;
            StateSpec::ph(x, plan.held)
        }
        ProcessType::Isentropic => {
            sample.pressure = x;
            sample.entropy = plan.held;
            StateSpec::ps(x, plan.held)
        }
        ProcessType::Polytropic => {
            let t = polytropic_temperature(plan.t0, plan.p0, x, plan.polytropic_n);
            sample.pressure = x;
            StateSpec::tp(t, x)
        }
    };

    let resolved = if state.first.1.is_finite() && state.second.1.is_finite() {
        oracle
            .query_many(&OUTPUTS, state, plan.fluid)
            .and_then(|values| {
                oracle
                    .query_phase(state, plan.fluid)
                    .map(|phase| (values, phase))
            })
    } else {
        Err(FluidError::NonPhysical {
            what: "non-finite state input",
        })
    };

    match resolved {
        Ok((values, phase)) if values.len() == OUTPUTS.len() => {
            let [t, p, h, s, d, u, q] = [
                values[0], values[1], values[2], values[3], values[4], values[5], values[6],
            ];
            // Held and swept inputs are reported exactly as requested.
            let keep = |known: f64, queried: f64| if known.is_nan() { queried } else { known };
            sample.temperature = keep(sample.temperature, t);
            sample.pressure = keep(sample.pressure, p);
            sample.enthalpy = keep(sample.enthalpy, h);
            sample.entropy = keep(sample.entropy, s);
            sample.density = keep(sample.density, d);
            sample.internal_energy = u;
            sample.quality = q;
            sample.phase = phase;
        }
        Ok((values, _)) => {
            debug!(
                fluid = plan.fluid,
                process = %plan.process,
                index,
                got = values.len(),
                "unexpected number of outputs"
            );
            sample.failed = true;
        }
        Err(e) => {
            debug!(
                fluid = plan.fluid,
                process = %plan.process,
                index,
                state = %state,
                error = %e,
                "sample degraded"
            );
            sample.failed = true;
        }
    }
    sample
}

fn store(result: &mut ProcessPathResult, i: usize, sample: Sample) {
    result.temperature[i] = sample.temperature;
    result.pressure[i] = sample.pressure;
    result.enthalpy[i] = sample.enthalpy;
    result.entropy[i] = sample.entropy;
    result.density[i] = sample.density;
    result.internal_energy[i] = sample.internal_energy;
    result.quality[i] = sample.quality;
    result.phase[i] = sample.phase;
    result.failed[i] = sample.failed;
}
