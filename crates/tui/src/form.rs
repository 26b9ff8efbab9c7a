use campus_hub_core::{
    display::{Category, Vehicle},
    validation::{ResourceForm, RideForm},
};

const AVAILABILITY: &[&str] = &["Available", "Reserved"];
const SEAT_CHOICES: &[&str] = &["1", "2"];
const MAX_FIELD_LEN: usize = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Resource,
    Ride,
}

impl FormKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::Resource => "Add Item",
            Self::Ride => "Post Ride",
        }
    }
}

/// Single labelled input. Fields with `choices` cycle instead of accepting text.
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub input: String,
    cursor: usize,
    choices: Vec<&'static str>,
    required: bool,
    touched: bool,
}

impl FormField {
    fn text(label: &'static str) -> Self {
        Self::with_value(label, String::new())
    }

    fn optional(label: &'static str) -> Self {
        let mut field = Self::text(label);
        field.required = false;
        field
    }

    fn with_value(label: &'static str, input: String) -> Self {
        let cursor = input.chars().count();
        Self {
            label,
            input,
            cursor,
            choices: Vec::new(),
            required: true,
            touched: false,
        }
    }

    fn select(label: &'static str, choices: Vec<&'static str>) -> Self {
        let input = choices.first().copied().unwrap_or_default().to_string();
        let mut field = Self::with_value(label, input);
        field.choices = choices;
        field.required = false;
        field
    }

    pub fn is_select(&self) -> bool {
        !self.choices.is_empty()
    }

    /// Required, already visited, and still blank.
    pub fn is_missing(&self) -> bool {
        self.required && self.touched && self.input.trim().is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn cycle(&mut self, delta: isize) {
        if self.choices.is_empty() {
            return;
        }
        let len = self.choices.len() as isize;
        let current = self
            .choices
            .iter()
            .position(|choice| *choice == self.input)
            .unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.input = self.choices[next].to_string();
        self.cursor = self.input.chars().count();
    }

    fn move_cursor(&mut self, delta: isize) {
        if self.is_select() {
            self.cycle(delta);
            return;
        }
        let len = self.input.chars().count() as isize;
        let next = (self.cursor as isize + delta).clamp(0, len);
        self.cursor = next as usize;
    }

    fn move_home(&mut self) {
        self.cursor = 0;
    }

    fn move_end(&mut self) {
        self.cursor = self.input.chars().count();
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_index)
            .map(|(idx, _)| idx)
            .unwrap_or(self.input.len())
    }

    fn insert(&mut self, ch: char) {
        if self.is_select() || self.input.chars().count() >= MAX_FIELD_LEN {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.input.insert(at, ch);
        self.cursor += 1;
    }

    fn backspace(&mut self) {
        if self.is_select() || self.cursor == 0 {
            return;
        }
        let at = self.byte_index(self.cursor - 1);
        self.input.remove(at);
        self.cursor -= 1;
    }

    fn delete(&mut self) {
        if self.is_select() || self.cursor >= self.input.chars().count() {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.input.remove(at);
    }
}

/// Modal holding the fields of either posting form.
#[derive(Debug, Clone)]
pub struct FormModal {
    pub kind: FormKind,
    pub fields: Vec<FormField>,
    pub focus: usize,
}

impl FormModal {
    pub fn resource() -> Self {
        let categories = Category::ALL.iter().map(|c| c.label()).collect();
        Self {
            kind: FormKind::Resource,
            fields: vec![
                FormField::text("Item name"),
                FormField::select("Category", categories),
                FormField::text("Description"),
                FormField::select("Availability", AVAILABILITY.to_vec()),
                FormField::optional("Price (0 = free)"),
                FormField::text("Location"),
            ],
            focus: 0,
        }
    }

    /// Ride form with the date prefilled as `today` (`YYYY-MM-DD`).
    pub fn ride(today: String) -> Self {
        let vehicles = Vehicle::ALL.iter().map(|v| v.label()).collect();
        Self {
            kind: FormKind::Ride,
            fields: vec![
                FormField::text("From"),
                FormField::text("To"),
                FormField::with_value("Date (YYYY-MM-DD)", today),
                FormField::text("Time (HH:MM)"),
                FormField::select("Seats", SEAT_CHOICES.to_vec()),
                FormField::text("Cost per person"),
                FormField::text("Driver"),
                FormField::select("Vehicle", vehicles),
            ],
            focus: 0,
        }
    }

    pub fn focused(&self) -> Option<&FormField> {
        self.fields.get(self.focus)
    }

    fn focused_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.focus)
    }

    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.leave_focused();
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn previous_field(&mut self) {
        if !self.fields.is_empty() {
            self.leave_focused();
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    fn leave_focused(&mut self) {
        if let Some(field) = self.focused_mut() {
            field.touched = true;
        }
    }

    /// Flag every blank required field, as on a submit attempt.
    pub fn touch_all(&mut self) {
        for field in &mut self.fields {
            field.touched = true;
        }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if let Some(field) = self.focused_mut() {
            field.move_cursor(delta);
        }
    }

    pub fn move_home(&mut self) {
        if let Some(field) = self.focused_mut() {
            field.move_home();
        }
    }

    pub fn move_end(&mut self) {
        if let Some(field) = self.focused_mut() {
            field.move_end();
        }
    }

    pub fn insert(&mut self, ch: char) {
        if let Some(field) = self.focused_mut() {
            field.insert(ch);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.focused_mut() {
            field.backspace();
        }
    }

    pub fn delete(&mut self) {
        if let Some(field) = self.focused_mut() {
            field.delete();
        }
    }

    fn value(&self, idx: usize) -> String {
        self.fields
            .get(idx)
            .map(|field| field.input.clone())
            .unwrap_or_default()
    }

    pub fn resource_form(&self) -> ResourceForm {
        ResourceForm {
            item_name: self.value(0),
            category: self.value(1),
            description: self.value(2),
            availability: self.value(3),
            price: self.value(4),
            location: self.value(5),
        }
    }

    pub fn ride_form(&self) -> RideForm {
        RideForm {
            from: self.value(0),
            to: self.value(1),
            date: self.value(2),
            time: self.value(3),
            seats: self.value(4),
            cost_per_person: self.value(5),
            driver: self.value(6),
            vehicle: self.value(7),
        }
    }
}
