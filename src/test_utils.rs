use crate::DayStorage;

/// Days whose fields fit every layout
pub(crate) fn sample_days() -> Vec<DayStorage> {
    let mut days = Vec::new();
    for era in [0, 1] {
        for year in [1, 5, 60] {
            for month in [1, 2, 12] {
                for day in [1, 15, 31] {
                    days.push(DayStorage::new(era, year, month, day));
                }
            }
        }
    }
    days
}
