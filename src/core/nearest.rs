use crate::domain::model::StateVector;
use crate::utils::error::{Result, TrackerError};
use chrono::{Datelike, NaiveDateTime, Timelike};

/// 找出最接近 `now` 的狀態向量索引。
///
/// 只考慮與 `now` 同一個年內日 (day-of-year) 且同一小時的資料，
/// 再挑分鐘差最小者；分鐘差相同時取先出現的那筆。
pub fn nearest_epoch_index(state_vectors: &[StateVector], now: NaiveDateTime) -> Result<usize> {
    let day_of_year = now.ordinal();
    let hour = now.hour();
    let minute = now.minute();

    let mut best: Option<(usize, u32)> = None;

    for (index, sv) in state_vectors.iter().enumerate() {
        if sv.epoch.day_of_year() != day_of_year || sv.epoch.hour() != hour {
            continue;
        }

        let difference = sv.epoch.minute().abs_diff(minute);
        match best {
            Some((_, best_difference)) if best_difference <= difference => {}
            _ => best = Some((index, difference)),
        }
    }

    match best {
        Some((index, _)) => {
            tracing::debug!(
                "Nearest epoch to {} is #{} ({})",
                now,
                index,
                state_vectors[index].epoch
            );
            Ok(index)
        }
        None => Err(TrackerError::NoEpochNearNow { day_of_year, hour }),
    }
}
