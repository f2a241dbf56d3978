//! Grilla del calendario mensual
//!
//! Render puro y síncrono: dado mes/año, los agendamientos cargados y el
//! día seleccionado, produce una grilla de 7 columnas con 42 celdas
//! (6 semanas), semana iniciando en domingo. La comparación de fechas es
//! solo por fecha de calendario, sin hora del día.

use chrono::{Datelike, NaiveDate};

use crate::dto::agenda_dto::{CalendarCell, CalendarGrid};
use crate::models::booking::Booking;

/// Total fijo de celdas de la grilla (6 semanas de 7 días)
pub const GRID_CELLS: usize = 42;

const MONTH_NAMES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Dirección de navegación del mes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthDirection {
    Prev,
    Next,
}

impl MonthDirection {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "prev" => Some(MonthDirection::Prev),
            "next" => Some(MonthDirection::Next),
            _ => None,
        }
    }
}

/// Primer día del mes. `month` ya viene validado (1..=12).
pub fn month_start(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1)
        .unwrap_or_else(|| panic!("mes inválido: {}-{}", year, month))
}

/// Primer día del mes siguiente (límite exclusivo del alcance visible)
pub fn next_month_start(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = shift_month(year, month, MonthDirection::Next);
    month_start(next_year, next_month)
}

/// Cantidad de días del mes
pub fn days_in_month(year: i32, month: u32) -> u32 {
    next_month_start(year, month)
        .signed_duration_since(month_start(year, month))
        .num_days() as u32
}

/// Desplazar el mes visible ±1, con wrap de año en los bordes
/// diciembre/enero
pub fn shift_month(year: i32, month: u32, direction: MonthDirection) -> (i32, u32) {
    match direction {
        MonthDirection::Prev => {
            if month == 1 {
                (year - 1, 12)
            } else {
                (year, month - 1)
            }
        }
        MonthDirection::Next => {
            if month == 12 {
                (year + 1, 1)
            } else {
                (year, month + 1)
            }
        }
    }
}

/// Título localizado del mes, p.ej. "marzo de 2024"
pub fn month_title(year: i32, month: u32) -> String {
    format!("{} de {}", MONTH_NAMES[(month - 1) as usize], year)
}

/// Construir la grilla del mes: celdas vacías hasta alinear el día 1 a su
/// columna, una celda por día del mes con marcadores de hoy/seleccionado y
/// badge de agendamientos, y relleno final hasta 42 celdas.
pub fn build_month_grid(
    year: i32,
    month: u32,
    bookings: &[Booking],
    selected: Option<NaiveDate>,
    today: NaiveDate,
) -> CalendarGrid {
    let first_day = month_start(year, month);
    let total_days = days_in_month(year, month);

    let mut cells = Vec::with_capacity(GRID_CELLS);

    // Relleno inicial: el día 1 cae en su columna de día de semana
    let leading = first_day.weekday().num_days_from_sunday();
    for _ in 0..leading {
        cells.push(CalendarCell::empty());
    }

    for day in 1..=total_days {
        let date = first_day + chrono::Duration::days((day - 1) as i64);
        let count = bookings.iter().filter(|b| b.date == date).count() as u32;

        cells.push(CalendarCell {
            day: Some(day),
            date: Some(date.format("%Y-%m-%d").to_string()),
            today: date == today,
            selected: selected == Some(date),
            bookings: count,
        });
    }

    // Relleno final hasta completar 6 semanas
    while cells.len() < GRID_CELLS {
        cells.push(CalendarCell::empty());
    }

    CalendarGrid {
        year,
        month,
        title: month_title(year, month),
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveTime, Utc};
    use sqlx::types::Json;
    use uuid::Uuid;

    fn booking_on(date: &str) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            departure_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            return_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            departure_address: "Av. Paulista, 1000".to_string(),
            return_address: "Rua das Flores, 25".to_string(),
            vehicle_id: Uuid::new_v4(),
            driver_id: Uuid::new_v4(),
            passengers: Json(vec!["María Silva".to_string()]),
            created_at: DateTime::<Utc>::MIN_UTC,
        }
    }

    fn any_day(year: i32, month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, 1).unwrap()
    }

    #[test]
    fn test_grid_always_has_42_cells() {
        for (year, month) in [(2024, 2), (2024, 3), (2023, 2), (2024, 12), (2025, 1)] {
            let grid = build_month_grid(year, month, &[], None, any_day(2020, 1));
            assert_eq!(grid.cells.len(), GRID_CELLS);
            assert_eq!(grid.cells.len() % 7, 0);
        }
    }

    #[test]
    fn test_one_cell_per_calendar_day() {
        let grid = build_month_grid(2024, 2, &[], None, any_day(2020, 1));
        let days: Vec<u32> = grid.cells.iter().filter_map(|c| c.day).collect();
        assert_eq!(days, (1..=29).collect::<Vec<u32>>()); // 2024 es bisiesto
    }

    #[test]
    fn test_days_land_on_their_weekday_column() {
        // Marzo de 2024: el día 1 es viernes (columna 5, domingo = 0)
        let grid = build_month_grid(2024, 3, &[], None, any_day(2020, 1));

        for (index, cell) in grid.cells.iter().enumerate() {
            if let Some(day) = cell.day {
                let date = NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
                assert_eq!(
                    index as u32 % 7,
                    date.weekday().num_days_from_sunday(),
                    "día {} fuera de columna",
                    day
                );
            }
        }
    }

    #[test]
    fn test_badge_counts_match_bookings() {
        let bookings = vec![
            booking_on("2024-03-15"),
            booking_on("2024-03-15"),
            booking_on("2024-03-20"),
        ];
        let grid = build_month_grid(2024, 3, &bookings, None, any_day(2020, 1));

        for cell in &grid.cells {
            match cell.day {
                Some(15) => assert_eq!(cell.bookings, 2),
                Some(20) => assert_eq!(cell.bookings, 1),
                _ => assert_eq!(cell.bookings, 0),
            }
        }
    }

    #[test]
    fn test_today_and_selected_markers() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let selected = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let grid = build_month_grid(2024, 3, &[], Some(selected), today);

        let today_cells: Vec<_> = grid.cells.iter().filter(|c| c.today).collect();
        assert_eq!(today_cells.len(), 1);
        assert_eq!(today_cells[0].day, Some(10));

        let selected_cells: Vec<_> = grid.cells.iter().filter(|c| c.selected).collect();
        assert_eq!(selected_cells.len(), 1);
        assert_eq!(selected_cells[0].day, Some(15));
    }

    #[test]
    fn test_markers_compare_by_calendar_date_only() {
        // Hoy en otro mes: ninguna celda se marca
        let today = NaiveDate::from_ymd_opt(2024, 4, 10).unwrap();
        let grid = build_month_grid(2024, 3, &[], None, today);
        assert!(grid.cells.iter().all(|c| !c.today));
    }

    #[test]
    fn test_shift_month_wraps_year() {
        assert_eq!(shift_month(2024, 12, MonthDirection::Next), (2025, 1));
        assert_eq!(shift_month(2024, 1, MonthDirection::Prev), (2023, 12));
        assert_eq!(shift_month(2024, 6, MonthDirection::Next), (2024, 7));
        assert_eq!(shift_month(2024, 6, MonthDirection::Prev), (2024, 5));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 4), 30);
    }

    #[test]
    fn test_month_title() {
        assert_eq!(month_title(2024, 3), "marzo de 2024");
        assert_eq!(month_title(2025, 1), "enero de 2025");
    }

    #[test]
    fn test_month_direction_parse() {
        assert_eq!(MonthDirection::parse("prev"), Some(MonthDirection::Prev));
        assert_eq!(MonthDirection::parse("next"), Some(MonthDirection::Next));
        assert_eq!(MonthDirection::parse("sideways"), None);
    }
}
