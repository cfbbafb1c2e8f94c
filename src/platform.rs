pub type AppError = Box<dyn std::error::Error + Send + Sync>;
pub type AppResult<T> = Result<T, AppError>;

/// 네이티브 플랫폼 시작 함수: `decay-sandbox [Z A [seed]]`
#[cfg(not(target_arch = "wasm32"))]
pub fn start() -> AppResult<()> {
    use crate::simulation::chain::ChainConfig;
    use crate::simulation::half_life::format_half_life;
    use crate::simulation::session::DecaySession;

    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (z, a) = match args.as_slice() {
        [] => (92, 238),
        [z, a, ..] => (z.parse()?, a.parse()?),
        [_] => return Err("usage: decay-sandbox [Z A [seed]]".into()),
    };

    // 시드가 없으면 매번 다른 체인
    let mut session = match args.get(2) {
        Some(seed) => DecaySession::with_seed(seed.parse()?),
        None => DecaySession::from_entropy(),
    };
    session.load(z, a)?;

    let chain = session.chain(ChainConfig::default());
    for step in chain.steps() {
        match (step.mode, step.energy_mev, step.half_life) {
            (Some(mode), Some(energy), Some(half_life)) => println!(
                "{:>3} {:<2}-{:<3}  {:<5} {:>7.2} MeV  t½ {}",
                step.z,
                step.symbol,
                step.a,
                mode,
                energy,
                format_half_life(half_life)
            ),
            _ => println!(
                "{:>3} {:<2}-{:<3}  {}",
                step.z,
                step.symbol,
                step.a,
                if step.stable { "stable" } else { "unstable" }
            ),
        }
    }

    if chain.converged() {
        println!(
            "{} steps, {:.2} MeV released",
            chain.transitions(),
            chain.total_energy_mev()
        );
    } else {
        println!(
            "did not reach a stable nuclide within {} steps",
            ChainConfig::default().max_steps
        );
    }

    Ok(())
}

// wasm32 타겟에서 필요한 import들
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    // 이미 로거가 설정된 경우(핫 리로드) 실패해도 무시
    let _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();
    log::info!("Decay engine ready");
}
