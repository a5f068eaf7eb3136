//! Generic form machinery shared by the two form screens.
//!
//! A [`Form`] tracks focus, cursor, and per-field error state; the record
//! itself stays the single source of truth for values. Edits go through
//! [`FieldAccess::set`], which replaces exactly one leaf of the record, and
//! clear that field's error immediately.

use crate::models::WorkMode;

/// String-keyed access to a record's editable leaves, one per form field.
pub trait FieldAccess {
    type Id: Copy + Eq;

    fn get(&self, id: Self::Id) -> String;
    fn set(&mut self, id: Self::Id, value: String);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Multiline,
    /// Free-text date entry, YYYY-MM-DD.
    Date,
    /// Fixed option list; Left/Right cycles, starting empty until chosen.
    Select(&'static [&'static str]),
    /// Cycles the three work modes; never empty.
    WorkModeSelect,
    /// Tag list with an input buffer. Enter adds, Backspace on an empty
    /// buffer removes the newest tag.
    Skills,
}

#[derive(Debug)]
pub struct Field<F> {
    pub id: F,
    pub label: &'static str,
    pub section: &'static str,
    pub kind: FieldKind,
    pub placeholder: &'static str,
    pub required: bool,
    pub cursor: usize,
    pub error: Option<String>,
    /// Pending skill text; only used by [`FieldKind::Skills`].
    pub buffer: String,
}

impl<F> Field<F> {
    pub fn new(id: F, label: &'static str, section: &'static str, kind: FieldKind) -> Self {
        Self {
            id,
            label,
            section,
            kind,
            placeholder: "",
            required: true,
            cursor: 0,
            error: None,
            buffer: String::new(),
        }
    }

    pub fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// Focus and error state for one form screen. `focused` indexes `fields`;
/// when `submit_focused` is set the submit control has focus instead.
#[derive(Debug)]
pub struct Form<F> {
    pub fields: Vec<Field<F>>,
    pub focused: usize,
    pub submit_focused: bool,
    pub scroll: u16,
}

impl<F: Copy + Eq> Form<F> {
    pub fn new(fields: Vec<Field<F>>) -> Self {
        Self {
            fields,
            focused: 0,
            submit_focused: false,
            scroll: 0,
        }
    }

    pub fn focused_field(&self) -> Option<&Field<F>> {
        if self.submit_focused {
            None
        } else {
            self.fields.get(self.focused)
        }
    }

    fn focused_field_mut(&mut self) -> Option<&mut Field<F>> {
        if self.submit_focused {
            None
        } else {
            self.fields.get_mut(self.focused)
        }
    }

    pub fn next_field(&mut self) {
        if self.submit_focused {
            return;
        }
        if self.focused + 1 < self.fields.len() {
            self.focused += 1;
        } else {
            self.submit_focused = true;
        }
        self.reset_cursor();
    }

    pub fn prev_field(&mut self) {
        if self.submit_focused {
            self.submit_focused = false;
        } else if self.focused > 0 {
            self.focused -= 1;
        }
        self.reset_cursor();
    }

    /// Park the cursor at the end of the newly focused value; the next edit
    /// re-clamps anyway.
    fn reset_cursor(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focused) {
            field.cursor = usize::MAX;
        }
    }

    fn clamped_cursor(cursor: usize, value: &str) -> usize {
        cursor.min(value.len())
    }

    /// Insert `c` into the focused field's value (or skill buffer) at the
    /// cursor, clearing any stale error on that field.
    pub fn insert_char<R: FieldAccess<Id = F>>(&mut self, record: &mut R, c: char) {
        let Some(field) = self.focused_field_mut() else {
            return;
        };
        match field.kind {
            FieldKind::Select(_) | FieldKind::WorkModeSelect => {}
            FieldKind::Skills => {
                let at = Self::clamped_cursor(field.cursor, &field.buffer);
                field.buffer.insert(at, c);
                field.cursor = at + c.len_utf8();
            }
            _ => {
                let id = field.id;
                let mut value = record.get(id);
                let at = Self::clamped_cursor(field.cursor, &value);
                value.insert(at, c);
                record.set(id, value);
                let field = &mut self.fields[self.focused];
                field.cursor = at + c.len_utf8();
                field.error = None;
            }
        }
    }

    /// Delete the char before the cursor. Returns `false` only when the
    /// skills buffer was already empty, so the caller can pop the newest tag
    /// instead.
    pub fn backspace<R: FieldAccess<Id = F>>(&mut self, record: &mut R) -> bool {
        let Some(field) = self.focused_field_mut() else {
            return true;
        };
        match field.kind {
            FieldKind::Select(_) | FieldKind::WorkModeSelect => true,
            FieldKind::Skills => {
                let at = Self::clamped_cursor(field.cursor, &field.buffer);
                if at == 0 {
                    return false;
                }
                let prev = floor_char_boundary(&field.buffer, at - 1);
                field.buffer.remove(prev);
                field.cursor = prev;
                true
            }
            _ => {
                let id = field.id;
                let mut value = record.get(id);
                let at = Self::clamped_cursor(field.cursor, &value);
                if at == 0 {
                    return true;
                }
                let prev = floor_char_boundary(&value, at - 1);
                value.remove(prev);
                record.set(id, value);
                let field = &mut self.fields[self.focused];
                field.cursor = prev;
                field.error = None;
                true
            }
        }
    }

    pub fn cursor_left<R: FieldAccess<Id = F>>(&mut self, record: &R) {
        let Some(field) = self.focused_field_mut() else {
            return;
        };
        let value = match field.kind {
            FieldKind::Skills => field.buffer.clone(),
            _ => record.get(field.id),
        };
        let at = Self::clamped_cursor(field.cursor, &value);
        if at > 0 {
            field.cursor = floor_char_boundary(&value, at - 1);
        }
    }

    pub fn cursor_right<R: FieldAccess<Id = F>>(&mut self, record: &R) {
        let Some(field) = self.focused_field_mut() else {
            return;
        };
        let value = match field.kind {
            FieldKind::Skills => field.buffer.clone(),
            _ => record.get(field.id),
        };
        let at = Self::clamped_cursor(field.cursor, &value);
        if let Some(c) = value[at..].chars().next() {
            field.cursor = at + c.len_utf8();
        }
    }

    /// Step a select field through its options. No-op on other kinds.
    pub fn cycle_select<R: FieldAccess<Id = F>>(&mut self, record: &mut R, step: isize) {
        let Some(field) = self.focused_field_mut() else {
            return;
        };
        let options: Vec<&str> = match field.kind {
            FieldKind::Select(options) => options.to_vec(),
            FieldKind::WorkModeSelect => WorkMode::ALL.iter().map(|m| m.label()).collect(),
            _ => return,
        };
        if options.is_empty() {
            return;
        }
        let id = field.id;
        let current = record.get(id);
        let next = match options.iter().position(|o| *o == current) {
            Some(at) => {
                let len = options.len() as isize;
                ((at as isize + step).rem_euclid(len)) as usize
            }
            // Not chosen yet: either end depending on direction.
            None if step >= 0 => 0,
            None => options.len() - 1,
        };
        record.set(id, options[next].to_string());
        let field = &mut self.fields[self.focused];
        field.error = None;
    }

    /// Attach validation errors to their fields, clearing the rest, and move
    /// focus to the first offender.
    pub fn apply_errors(&mut self, errors: &std::collections::BTreeMap<F, String>)
    where
        F: Ord,
    {
        for field in &mut self.fields {
            field.error = errors.get(&field.id).cloned();
        }
        if let Some(first) = self.fields.iter().position(|f| f.error.is_some()) {
            self.focused = first;
            self.submit_focused = false;
            self.reset_cursor();
        }
    }

    pub fn clear_errors(&mut self) {
        for field in &mut self.fields {
            field.error = None;
        }
    }

    pub fn error_for(&self, id: F) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.id == id)
            .and_then(|f| f.error.as_deref())
    }
}

fn floor_char_boundary(s: &str, mut at: usize) -> usize {
    while at > 0 && !s.is_char_boundary(at) {
        at -= 1;
    }
    at
}
