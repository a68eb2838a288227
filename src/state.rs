use std::collections::VecDeque;

use crate::catalog::{Catalog, LineupRecord, Map, Side, UtilityType};
use crate::details::DetailParams;
use crate::opener::{LaunchOutcome, UNOPENABLE_NOTICE};
use crate::selection::{Selection, SelectionEngine};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Browse,
    Details(DetailParams),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Map,
    Side,
    Utility,
    Lineups,
}

/// Modal alert. Every other key is ignored until it is dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    LaunchFinished(LaunchOutcome),
}

#[derive(Debug, Clone)]
pub struct AppState<'a> {
    pub screen: Screen,
    pub focus: Focus,
    pub map_cursor: usize,
    pub side_cursor: usize,
    pub utility_cursor: usize,
    pub lineup_cursor: usize,
    pub notice: Option<Notice>,
    pub help_overlay: bool,
    pub launch_pending: bool,
    pub logs: VecDeque<String>,
    engine: SelectionEngine<'a>,
}

impl<'a> AppState<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            screen: Screen::Browse,
            focus: Focus::Map,
            map_cursor: 0,
            side_cursor: 0,
            utility_cursor: 0,
            lineup_cursor: 0,
            notice: None,
            help_overlay: false,
            launch_pending: false,
            logs: VecDeque::with_capacity(200),
            engine: SelectionEngine::new(catalog),
        }
    }

    pub fn engine(&self) -> &SelectionEngine<'a> {
        &self.engine
    }

    pub fn selection(&self) -> &Selection {
        self.engine.selection()
    }

    pub fn visible_lineups(&self) -> Vec<&'a LineupRecord> {
        self.engine.visible_lineups()
    }

    pub fn highlighted_lineup(&self) -> Option<&'a LineupRecord> {
        self.visible_lineups().get(self.lineup_cursor).copied()
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn choose_map(&mut self, map: Map) {
        self.engine.choose_map(map);
        self.side_cursor = 0;
        self.utility_cursor = 0;
        self.lineup_cursor = 0;
        self.push_log(format!("[INFO] Map: {map}"));
    }

    pub fn choose_side(&mut self, side: Side) -> bool {
        if !self.engine.choose_side(side) {
            self.push_log("[WARN] Pick a map before the side");
            return false;
        }
        self.utility_cursor = 0;
        self.lineup_cursor = 0;
        self.push_log(format!("[INFO] Side: {side}"));
        true
    }

    pub fn choose_utility_type(&mut self, utility_type: UtilityType) -> bool {
        if !self.engine.choose_utility_type(utility_type) {
            self.push_log("[WARN] Pick map and side before the utility");
            return false;
        }
        self.lineup_cursor = 0;
        let count = self.visible_lineups().len();
        self.push_log(format!("[INFO] Utility: {utility_type} ({count} lineups)"));
        true
    }

    fn focus_enabled(&self, focus: Focus) -> bool {
        let selection = self.selection();
        match focus {
            Focus::Map => true,
            Focus::Side => selection.side_enabled(),
            Focus::Utility => selection.utility_enabled(),
            Focus::Lineups => !self.visible_lineups().is_empty(),
        }
    }

    pub fn focus_next(&mut self) {
        const ORDER: [Focus; 4] = [Focus::Map, Focus::Side, Focus::Utility, Focus::Lineups];
        let start = ORDER.iter().position(|f| *f == self.focus).unwrap_or(0);
        for step in 1..=ORDER.len() {
            let candidate = ORDER[(start + step) % ORDER.len()];
            if self.focus_enabled(candidate) {
                self.focus = candidate;
                return;
            }
        }
    }

    pub fn focus_prev(&mut self) {
        const ORDER: [Focus; 4] = [Focus::Map, Focus::Side, Focus::Utility, Focus::Lineups];
        let start = ORDER.iter().position(|f| *f == self.focus).unwrap_or(0);
        for step in 1..=ORDER.len() {
            let candidate = ORDER[(start + ORDER.len() - step) % ORDER.len()];
            if self.focus_enabled(candidate) {
                self.focus = candidate;
                return;
            }
        }
    }

    fn focused_len(&self) -> usize {
        match self.focus {
            Focus::Map => Map::ALL.len(),
            Focus::Side => Side::ALL.len(),
            Focus::Utility => UtilityType::ALL.len(),
            Focus::Lineups => self.visible_lineups().len(),
        }
    }

    fn focused_cursor(&mut self) -> &mut usize {
        match self.focus {
            Focus::Map => &mut self.map_cursor,
            Focus::Side => &mut self.side_cursor,
            Focus::Utility => &mut self.utility_cursor,
            Focus::Lineups => &mut self.lineup_cursor,
        }
    }

    pub fn select_next(&mut self) {
        let total = self.focused_len();
        let cursor = self.focused_cursor();
        if total == 0 {
            *cursor = 0;
            return;
        }
        *cursor = (*cursor + 1) % total;
    }

    pub fn select_prev(&mut self) {
        let total = self.focused_len();
        let cursor = self.focused_cursor();
        if total == 0 {
            *cursor = 0;
            return;
        }
        if *cursor == 0 {
            *cursor = total - 1;
        } else {
            *cursor -= 1;
        }
    }

    /// Enter on the browse screen chooses the option under the cursor and moves on to the
    /// next step. On the details screen it requests the video; the returned URL is what
    /// the caller must hand to the opener.
    pub fn activate(&mut self) -> Option<String> {
        if let Screen::Details(params) = &self.screen {
            let video_url = params.video_url.clone();
            return self.request_launch(video_url.as_deref());
        }

        match self.focus {
            Focus::Map => {
                let Some(map) = Map::ALL.get(self.map_cursor).copied() else {
                    return None;
                };
                self.choose_map(map);
                self.focus = Focus::Side;
            }
            Focus::Side => {
                let Some(side) = Side::ALL.get(self.side_cursor).copied() else {
                    return None;
                };
                if self.choose_side(side) {
                    self.focus = Focus::Utility;
                }
            }
            Focus::Utility => {
                let Some(utility_type) = UtilityType::ALL.get(self.utility_cursor).copied() else {
                    return None;
                };
                if self.choose_utility_type(utility_type) && !self.visible_lineups().is_empty() {
                    self.focus = Focus::Lineups;
                }
            }
            Focus::Lineups => {
                if let Some(lineup) = self.highlighted_lineup() {
                    self.open_details(DetailParams::from_record(lineup));
                }
            }
        }
        None
    }

    /// Skips the details screen and launches the highlighted lineup's video.
    pub fn launch_highlighted(&mut self) -> Option<String> {
        if self.focus != Focus::Lineups {
            return None;
        }
        let video_url = self.highlighted_lineup().map(|lineup| lineup.video_url.clone());
        self.request_launch(video_url.as_deref())
    }

    pub fn open_details(&mut self, params: DetailParams) {
        let name = params.name.clone().unwrap_or_else(|| "-".to_string());
        self.screen = Screen::Details(params);
        self.push_log(format!("[INFO] Details: {name}"));
    }

    pub fn back(&mut self) {
        self.screen = Screen::Browse;
    }

    /// Returns the URL to open, or `None` when the request ends here (notice shown or a
    /// launch is already pending).
    pub fn request_launch(&mut self, video_url: Option<&str>) -> Option<String> {
        if self.launch_pending {
            self.push_log("[INFO] Video launch already pending");
            return None;
        }
        let Some(url) = video_url.map(str::trim).filter(|url| !url.is_empty()) else {
            self.push_log("[WARN] No video url for this lineup");
            self.show_unopenable();
            return None;
        };
        self.launch_pending = true;
        self.push_log(format!("[INFO] Opening {url}"));
        Some(url.to_string())
    }

    pub fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::LaunchFinished(outcome) => {
                self.launch_pending = false;
                match outcome {
                    LaunchOutcome::Opened { url } => {
                        self.push_log(format!("[INFO] Opened {url}"));
                    }
                    LaunchOutcome::Unopenable { url, reason } => {
                        let url = url.unwrap_or_else(|| "-".to_string());
                        self.push_log(format!("[WARN] Could not open {url}: {reason}"));
                        self.show_unopenable();
                    }
                }
            }
        }
    }

    fn show_unopenable(&mut self) {
        self.notice = Some(Notice {
            title: "Error".to_string(),
            message: UNOPENABLE_NOTICE.to_string(),
        });
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}
