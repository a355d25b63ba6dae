use crate::persistence::{default_state_path, load_state_file, save_state_file, SavedAction};
use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use lotto_core::{DrawResult, Event, EventBus, LottoConfig, SelectError, Selector};
use std::collections::VecDeque;
use std::path::PathBuf;
use tracing::{info, warn};

const MAX_EVENT_LOG: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiLocale {
    EnUs,
    KoKr,
}

impl UiLocale {
    pub fn from_opt(value: Option<&str>) -> Self {
        if normalize_locale(value) == "ko_KR" {
            Self::KoKr
        } else {
            Self::EnUs
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::EnUs => "en_US",
            Self::KoKr => "ko_KR",
        }
    }

    pub fn text<'a>(self, en: &'a str, ko: &'a str) -> &'a str {
        if matches!(self, Self::KoKr) {
            ko
        } else {
            en
        }
    }
}

/// Accepts `ko`, `ko-KR`, `ko_KR.UTF-8` and similar; everything else is English.
pub fn normalize_locale(value: Option<&str>) -> &'static str {
    let Some(raw) = value else {
        return "en_US";
    };
    let lowered = raw.trim().to_ascii_lowercase().replace('-', "_");
    let base = lowered.split('.').next().unwrap_or_default();
    if base == "ko" || base == "kr" || base.starts_with("ko_") {
        "ko_KR"
    } else {
        "en_US"
    }
}

pub fn select_error_message(locale: UiLocale, err: &SelectError) -> String {
    match (locale, err) {
        (UiLocale::EnUs, SelectError::AlreadyRun) => "please reset first".to_string(),
        (UiLocale::KoKr, SelectError::AlreadyRun) => {
            "초기화 버튼을 누른 후 시도해주세요.".to_string()
        }
        (UiLocale::EnUs, SelectError::CapacityExceeded { max }) => {
            format!("at most {max} numbers may be preselected")
        }
        (UiLocale::KoKr, SelectError::CapacityExceeded { max }) => {
            format!("번호는 {max}개까지 지정할 수 있습니다.")
        }
        (UiLocale::EnUs, SelectError::DuplicateValue(_)) => "number already selected".to_string(),
        (UiLocale::KoKr, SelectError::DuplicateValue(_)) => "이미 선택한 번호입니다.".to_string(),
        (UiLocale::EnUs, SelectError::OutOfRange { min, max, .. }) => {
            format!("pick a number between {min} and {max}")
        }
        (UiLocale::KoKr, SelectError::OutOfRange { min, max, .. }) => {
            format!("{min}부터 {max} 사이의 번호를 선택하세요.")
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPromptMode {
    Save,
    Load,
}

pub struct App {
    pub locale: UiLocale,
    pub recorded_actions: Vec<SavedAction>,
    pub selector: Selector,
    pub events: EventBus,
    pub picker: u8,
    pub typed: String,
    pub last_draw: Option<DrawResult>,
    pub event_log: VecDeque<String>,
    pub status_line: String,
    pub show_help: bool,
    pub path_prompt_mode: Option<PathPromptMode>,
    pub path_prompt_input: String,
    pub should_quit: bool,
}

impl App {
    pub fn bootstrap(locale: UiLocale, config: LottoConfig, seed: u64) -> Result<Self> {
        let selector = Selector::new(config, seed).context("build selector")?;
        let picker = selector.config().min_number;
        Ok(Self {
            locale,
            recorded_actions: Vec::new(),
            selector,
            events: EventBus::default(),
            picker,
            typed: String::new(),
            last_draw: None,
            event_log: VecDeque::new(),
            status_line: locale.text("ready", "준비").to_string(),
            show_help: false,
            path_prompt_mode: None,
            path_prompt_input: String::new(),
            should_quit: false,
        })
    }

    pub fn next_hint(&self) -> String {
        if self.selector.has_run() {
            return self
                .locale
                .text("draw again or reset", "다시 생성하거나 초기화")
                .to_string();
        }
        if self.selector.remaining_slots() == 0 {
            return self.locale.text("run the draw", "자동 생성").to_string();
        }
        self.locale
            .text("add numbers or run the draw", "번호 추가 또는 자동 생성")
            .to_string()
    }

    pub fn phase_label(&self) -> &'static str {
        if self.selector.has_run() {
            self.locale.text("Drawn", "생성 완료")
        } else {
            self.locale.text("Picking", "선택 중")
        }
    }

    /// Numbers shown in the ball row: the last draw, or the preselection so far.
    pub fn visible_numbers(&self) -> Vec<u8> {
        match self.last_draw.as_ref() {
            Some(result) => result.numbers().to_vec(),
            None => self.selector.preselected().to_vec(),
        }
    }

    pub fn slot_count(&self) -> usize {
        self.selector.config().pick_count
    }

    pub fn step_picker(&mut self, delta: i32) {
        let config = self.selector.config();
        let min = i32::from(config.min_number);
        let span = config.pool_size() as i32;
        let offset = (i32::from(self.picker) - min + delta).rem_euclid(span);
        self.picker = u8::try_from(min + offset).unwrap_or(config.min_number);
        self.typed.clear();
    }

    pub fn type_digit(&mut self, digit: u8) {
        let config = self.selector.config();
        let max_len = config.max_number.to_string().len();
        if self.typed.len() >= max_len {
            self.typed.clear();
        }
        self.typed.push(char::from(b'0' + digit));
        if let Ok(value) = self.typed.parse::<u8>() {
            if config.contains(value) {
                self.picker = value;
                return;
            }
        }
        self.typed.clear();
        self.typed.push(char::from(b'0' + digit));
        if config.contains(digit) {
            self.picker = digit;
        }
    }

    pub fn erase_digit(&mut self) {
        self.typed.pop();
    }

    pub fn clear_typed(&mut self) {
        self.typed.clear();
    }

    pub fn add_picked(&mut self) {
        let number = self.picker;
        match self.selector.add_preselection(number, &mut self.events) {
            Ok(()) => {
                self.push_status(format!("{} {number}", self.locale.text("added", "추가")));
                self.recorded_actions.push(SavedAction::add(number));
                self.typed.clear();
            }
            Err(err) => self.push_error(err),
        }
        self.flush_events();
    }

    pub fn draw(&mut self) {
        let result = self.selector.draw(&mut self.events);
        self.push_status(format!(
            "{} {}",
            self.locale.text("drawn", "생성"),
            format_numbers(result.numbers())
        ));
        self.last_draw = Some(result);
        self.recorded_actions.push(SavedAction::draw());
        self.flush_events();
    }

    pub fn reset(&mut self) {
        self.selector.reset(&mut self.events);
        self.last_draw = None;
        self.typed.clear();
        self.push_status(self.locale.text("cleared", "초기화"));
        self.recorded_actions.push(SavedAction::reset());
        self.flush_events();
    }

    pub fn auto_perform_actions(&mut self, actions: &[SavedAction]) -> Result<(), String> {
        for action in actions {
            apply_saved_action(
                &mut self.selector,
                &mut self.events,
                &mut self.last_draw,
                action,
            )?;
            self.recorded_actions.push(action.clone());
        }
        self.push_status(format!(
            "{} {}",
            self.locale.text("auto performed", "자동 실행"),
            actions.len()
        ));
        self.flush_events();
        Ok(())
    }

    pub fn open_save_prompt(&mut self) {
        self.path_prompt_mode = Some(PathPromptMode::Save);
        self.path_prompt_input.clear();
    }

    pub fn open_load_prompt(&mut self) {
        self.path_prompt_mode = Some(PathPromptMode::Load);
        self.path_prompt_input.clear();
    }

    pub fn prompt_default_path_hint(&self) -> String {
        default_state_path()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "-".to_string())
    }

    pub fn handle_path_prompt_key(&mut self, key: KeyEvent) -> bool {
        let Some(mode) = self.path_prompt_mode else {
            return false;
        };
        match key.code {
            KeyCode::Esc => {
                self.path_prompt_mode = None;
                self.path_prompt_input.clear();
                self.push_status(self.locale.text("path prompt cancelled", "경로 입력 취소"));
            }
            KeyCode::Enter => {
                let resolved =
                    resolve_prompt_path(self.path_prompt_input.trim(), default_state_path());
                self.path_prompt_mode = None;
                self.path_prompt_input.clear();
                let Ok(path) = resolved else {
                    self.push_status(self.locale.text("save path unavailable", "저장 경로를 찾을 수 없습니다"));
                    return true;
                };
                match mode {
                    PathPromptMode::Save => self.save_to_path(path),
                    PathPromptMode::Load => self.load_from_path(path),
                }
            }
            KeyCode::Backspace => {
                self.path_prompt_input.pop();
            }
            KeyCode::Char(ch) => {
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT)
                {
                    self.path_prompt_input.push(ch);
                }
            }
            _ => {}
        }
        true
    }

    fn save_to_path(&mut self, path: PathBuf) {
        match save_state_file(
            self.locale.code(),
            self.selector.seed(),
            self.selector.config(),
            &self.recorded_actions,
            &path,
        ) {
            Ok(_) => {
                info!(path = %path.display(), actions = self.recorded_actions.len(), "session saved");
                self.push_status(format!(
                    "{} {} -> {}",
                    self.locale.text("saved actions", "저장한 동작"),
                    self.recorded_actions.len(),
                    path.display()
                ));
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "session save failed");
                self.push_status(format!(
                    "{}: {err}",
                    self.locale.text("save failed", "저장 실패")
                ));
            }
        }
    }

    fn load_from_path(&mut self, path: PathBuf) {
        let saved = match load_state_file(&path) {
            Ok(saved) => saved,
            Err(err) => {
                warn!(path = %path.display(), %err, "session load failed");
                self.push_load_failure(err);
                return;
            }
        };
        let mut restored = match Selector::new(saved.config.clone(), saved.seed) {
            Ok(selector) => selector,
            Err(err) => {
                self.push_load_failure(err);
                return;
            }
        };
        let mut restored_events = EventBus::default();
        let mut restored_draw = None;
        for action in &saved.actions {
            if let Err(err) =
                apply_saved_action(&mut restored, &mut restored_events, &mut restored_draw, action)
            {
                self.push_load_failure(err);
                return;
            }
        }
        self.picker = restored.config().min_number;
        self.selector = restored;
        self.events = restored_events;
        self.last_draw = restored_draw;
        self.recorded_actions = saved.actions;
        self.typed.clear();
        self.locale = UiLocale::from_opt(Some(saved.locale.as_str()));
        info!(path = %path.display(), actions = self.recorded_actions.len(), "session loaded");
        self.push_status(format!(
            "{} {} <- {}",
            self.locale.text("loaded actions", "불러온 동작"),
            self.recorded_actions.len(),
            path.display()
        ));
        self.flush_events();
    }

    fn push_load_failure(&mut self, err: impl std::fmt::Display) {
        self.push_status(format!(
            "{}: {err}",
            self.locale.text("load failed", "불러오기 실패")
        ));
    }

    pub fn push_status(&mut self, value: impl Into<String>) {
        self.status_line = value.into();
    }

    pub fn push_error(&mut self, err: SelectError) {
        self.status_line = format!(
            "{}: {}",
            self.locale.text("error", "오류"),
            select_error_message(self.locale, &err)
        );
    }

    fn flush_events(&mut self) {
        let drained: Vec<_> = self.events.drain().collect();
        for event in drained {
            self.push_event_line(format_event(self.locale, &event));
        }
    }

    fn push_event_line(&mut self, line: String) {
        if self.event_log.len() >= MAX_EVENT_LOG {
            let _ = self.event_log.pop_front();
        }
        self.event_log.push_back(line);
    }
}

fn resolve_prompt_path(input: &str, default_path: Option<PathBuf>) -> Result<PathBuf, String> {
    if input.is_empty() {
        return default_path.ok_or_else(|| "save path unavailable".to_string());
    }
    Ok(PathBuf::from(input))
}

fn apply_saved_action(
    selector: &mut Selector,
    events: &mut EventBus,
    last_draw: &mut Option<DrawResult>,
    action: &SavedAction,
) -> Result<(), String> {
    match action.action.as_str() {
        "add" => {
            let number = action
                .number
                .ok_or_else(|| "missing number for add".to_string())?;
            selector
                .add_preselection(number, events)
                .map_err(|err| err.to_string())?;
        }
        "draw" => *last_draw = Some(selector.draw(events)),
        "reset" => {
            selector.reset(events);
            *last_draw = None;
        }
        _ => return Err(format!("unknown saved action '{}'", action.action)),
    }
    Ok(())
}

pub fn format_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|number| number.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn format_event(locale: UiLocale, event: &Event) -> String {
    match event {
        Event::Preselected { number, count } => format!(
            "{} {number} ({count})",
            locale.text("preselected", "번호 지정")
        ),
        Event::Drawn {
            numbers,
            preselected,
        } => format!(
            "{} [{}] {} {preselected}",
            locale.text("drawn", "생성"),
            format_numbers(numbers),
            locale.text("kept", "고정")
        ),
        Event::Reset { cleared } => {
            format!("{} {cleared}", locale.text("reset, cleared", "초기화, 해제"))
        }
    }
}
