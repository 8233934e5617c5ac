use serde::{Deserialize, Serialize};

/// Known columns of the event feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Date,
    EventName,
    VenueName,
    GuestCount,
    EventStartTime,
    MealServiceStartTime,
    CocktailHourStartTime,
    PassedAppetizersStartTime,
    PassedAppetizers,
    EventConclusionTime,
    Address,
    City,
    State,
    Zipcode,
}

impl Column {
    pub const ALL: [Column; 14] = [
        Column::Date,
        Column::EventName,
        Column::VenueName,
        Column::GuestCount,
        Column::EventStartTime,
        Column::MealServiceStartTime,
        Column::CocktailHourStartTime,
        Column::PassedAppetizersStartTime,
        Column::PassedAppetizers,
        Column::EventConclusionTime,
        Column::Address,
        Column::City,
        Column::State,
        Column::Zipcode,
    ];

    /// Header text of the column in the feed
    pub fn header(self) -> &'static str {
        match self {
            Column::Date => "Date",
            Column::EventName => "Event Name",
            Column::VenueName => "Venue Name",
            Column::GuestCount => "Guest Count",
            Column::EventStartTime => "Event Start Time",
            Column::MealServiceStartTime => "Meal Service Start Time",
            Column::CocktailHourStartTime => "Cocktail Hour Start Time",
            Column::PassedAppetizersStartTime => "Passed Hors D'oeuvres Time Start",
            Column::PassedAppetizers => "Passed Hors D'oeuvres",
            Column::EventConclusionTime => "Event Conclusion/Breakdown Time",
            Column::Address => "Address",
            Column::City => "City",
            Column::State => "State",
            Column::Zipcode => "Zipcode",
        }
    }

    /// Look up a column by its header text; unknown headers are ignored
    pub fn from_header(header: &str) -> Option<Self> {
        let header = header.trim();
        Column::ALL.into_iter().find(|c| c.header() == header)
    }
}

/// One feed row.
///
/// A field is `None` when the feed has no such column and `Some("")` when the
/// column exists but the row left it blank or short.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub date: Option<String>,
    pub event_name: Option<String>,
    pub venue_name: Option<String>,
    pub guest_count: Option<String>,
    pub event_start_time: Option<String>,
    pub meal_service_start_time: Option<String>,
    pub cocktail_hour_start_time: Option<String>,
    pub passed_appetizers_start_time: Option<String>,
    pub passed_appetizers: Option<String>,
    pub event_conclusion_time: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
}

impl EventRecord {
    fn slot(&self, column: Column) -> &Option<String> {
        match column {
            Column::Date => &self.date,
            Column::EventName => &self.event_name,
            Column::VenueName => &self.venue_name,
            Column::GuestCount => &self.guest_count,
            Column::EventStartTime => &self.event_start_time,
            Column::MealServiceStartTime => &self.meal_service_start_time,
            Column::CocktailHourStartTime => &self.cocktail_hour_start_time,
            Column::PassedAppetizersStartTime => &self.passed_appetizers_start_time,
            Column::PassedAppetizers => &self.passed_appetizers,
            Column::EventConclusionTime => &self.event_conclusion_time,
            Column::Address => &self.address,
            Column::City => &self.city,
            Column::State => &self.state,
            Column::Zipcode => &self.zipcode,
        }
    }

    fn slot_mut(&mut self, column: Column) -> &mut Option<String> {
        match column {
            Column::Date => &mut self.date,
            Column::EventName => &mut self.event_name,
            Column::VenueName => &mut self.venue_name,
            Column::GuestCount => &mut self.guest_count,
            Column::EventStartTime => &mut self.event_start_time,
            Column::MealServiceStartTime => &mut self.meal_service_start_time,
            Column::CocktailHourStartTime => &mut self.cocktail_hour_start_time,
            Column::PassedAppetizersStartTime => &mut self.passed_appetizers_start_time,
            Column::PassedAppetizers => &mut self.passed_appetizers,
            Column::EventConclusionTime => &mut self.event_conclusion_time,
            Column::Address => &mut self.address,
            Column::City => &mut self.city,
            Column::State => &mut self.state,
            Column::Zipcode => &mut self.zipcode,
        }
    }

    /// Builder-style setter, handy for assembling rows by hand
    pub fn with(mut self, column: Column, value: impl Into<String>) -> Self {
        self.set(column, value);
        self
    }

    pub fn set(&mut self, column: Column, value: impl Into<String>) {
        *self.slot_mut(column) = Some(value.into());
    }

    /// Raw cell value
    pub fn get(&self, column: Column) -> Option<&str> {
        self.slot(column).as_deref()
    }

    /// Trimmed cell value, `None` when missing or blank
    pub fn non_empty(&self, column: Column) -> Option<&str> {
        self.get(column).map(str::trim).filter(|v| !v.is_empty())
    }

    /// Whether passed appetizers are served (`yes`, any case)
    pub fn appetizers_passed(&self) -> bool {
        self.non_empty(Column::PassedAppetizers)
            .is_some_and(|v| v.eq_ignore_ascii_case("yes"))
    }

    /// Street address as sent to the geocoder
    pub fn destination_address(&self) -> String {
        let part = |column| self.get(column).unwrap_or("");
        format!(
            "{}, {}, {} {}",
            part(Column::Address),
            part(Column::City),
            part(Column::State),
            part(Column::Zipcode)
        )
    }
}
