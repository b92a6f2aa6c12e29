use ndarray::Array2;

use crate::*;

/// Board state machine: owns every token and is the only thing that mutates them.
#[derive(Clone, Debug)]
pub struct BoardEngine {
    config: GameConfig,
    generator: RandomBoardGenerator,
    gems: Array2<Token>,
    phase: Phase,
    selected: Option<Coord2>,
    swapped: Option<(Coord2, Coord2)>,
    score: u32,
    used_tip: bool,
    bomb_count: u32,
}

impl BoardEngine {
    /// Builds a randomly filled board; `seed` drives every later refill as well.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let mut generator = RandomBoardGenerator::new(seed, config.start_board);
        let gems = deal(&mut generator, &config);
        log::info!("New {}x{} board, seed {}", config.size.0, config.size.1, seed);
        Ok(Self::from_parts(config, generator, gems))
    }

    /// Builds a board with fixed faces; refills still come from `seed`.
    pub fn with_layout(config: GameConfig, seed: u64, layout: Array2<Face>) -> Result<Self> {
        config.validate()?;
        let (cols, rows) = config.size;
        if layout.dim() != (usize::from(rows), usize::from(cols)) {
            return Err(GameError::InvalidBoardShape);
        }

        let metrics = config.metrics;
        let gems = Array2::from_shape_fn(layout.dim(), |(row, col)| {
            let coords = (col as Coord, row as Coord);
            Token::new(coords, layout[[row, col]], TokenStatus::Idle, &metrics)
        });
        let generator = RandomBoardGenerator::new(seed, config.start_board);
        Ok(Self::from_parts(config, generator, gems))
    }

    fn from_parts(
        config: GameConfig,
        generator: RandomBoardGenerator,
        gems: Array2<Token>,
    ) -> Self {
        Self {
            config,
            generator,
            gems,
            phase: Phase::default(),
            selected: None,
            swapped: None,
            score: 0,
            used_tip: false,
            bomb_count: 0,
        }
    }

    /// Throws the board away and deals a fresh one.
    pub fn reset(&mut self) {
        self.gems = deal(&mut self.generator, &self.config);
        self.phase = Phase::Waiting;
        self.selected = None;
        self.swapped = None;
        self.score = 0;
        self.used_tip = false;
        self.bomb_count = 0;
        log::info!("Board reset, seed {}", self.generator.seed());
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn bomb_count(&self) -> u32 {
        self.bomb_count
    }

    pub fn is_losing(&self) -> bool {
        self.phase.is_final()
    }

    pub fn selected(&self) -> Option<Coord2> {
        self.selected
    }

    pub fn at(&self, coords: Coord2) -> Option<&Token> {
        self.gems.get(coords.to_nd_index())
    }

    /// Whether a live bomb is on the board; faded-out bombs do not count.
    pub fn has_bomb(&self) -> bool {
        self.gems
            .iter()
            .any(|token| token.is_bomb() && token.status() != TokenStatus::Deleted)
    }

    pub fn faces(&self) -> Array2<Face> {
        self.gems.map(Token::face)
    }

    /// Draw-ready view of every token, row-major.
    pub fn tokens(&self) -> impl Iterator<Item = DrawToken> + '_ {
        let metrics = &self.config.metrics;
        self.gems
            .iter()
            .map(move |token| DrawToken::from_token(token, metrics))
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from_engine(self)
    }

    pub fn click(&mut self, point: Vec2) -> ClickOutcome {
        if !self.phase.accepts_clicks() {
            return ClickOutcome::NoChange;
        }

        let metrics = self.config.metrics;
        let Some(coords) = self
            .gems
            .iter()
            .find(|token| token.hit_test(point, &metrics))
            .map(Token::coords)
        else {
            return ClickOutcome::NoChange;
        };

        if self.token(coords).is_bomb() {
            self.explode(coords);
            return ClickOutcome::Detonated;
        }

        match (self.phase, self.selected) {
            (Phase::Selected, Some(first)) => {
                self.clear_possible_match();
                if manhattan(first, coords) != 1 {
                    return ClickOutcome::NoChange;
                }
                self.swap_contents(first, coords);
                for cell in [first, coords] {
                    if self.token(cell).status() == TokenStatus::Selected {
                        self.token_mut(cell).set_status(TokenStatus::Idle);
                    }
                }
                self.swapped = Some((first, coords));
                self.transition(PhaseEvent::Swap);
                log::debug!("Swapping {:?} with {:?}", first, coords);
                ClickOutcome::Swapped
            }
            _ => {
                self.selected = Some(coords);
                self.token_mut(coords).set_status(TokenStatus::Selected);
                self.transition(PhaseEvent::Pick);
                ClickOutcome::Selected
            }
        }
    }

    /// Advances the board by one frame and returns the phase it ends up in.
    pub fn update(&mut self) -> Phase {
        if self.phase == Phase::Waiting {
            self.resolve_waiting();
        }

        if self.phase.is_animating() {
            self.animate();
        }

        if self.phase == Phase::Losing {
            let metrics = self.config.metrics;
            for token in self.gems.iter_mut() {
                token.set_status(TokenStatus::Deleting);
                token.advance(&metrics);
            }
        }

        self.phase
    }

    fn resolve_waiting(&mut self) {
        for token in self.gems.iter_mut() {
            if token.status() == TokenStatus::New {
                token.set_status(TokenStatus::Idle);
            }
        }

        let matched = self.match_all();
        if matched > 0 {
            self.score = self.score.saturating_add(u32::from(matched));
            self.used_tip = false;
            self.transition(PhaseEvent::Cascade);
        } else if self.arrange() {
            self.transition(PhaseEvent::Cascade);
        } else if !self.find_possible_match(true) && !self.has_bomb() {
            log::info!("No moves left, final score {}", self.score);
            self.transition(PhaseEvent::Stalemate);
        }
    }

    fn animate(&mut self) {
        let metrics = self.config.metrics;
        let mut busy = false;
        for token in self.gems.iter_mut() {
            busy |= token.advance(&metrics).is_busy();
        }
        if busy {
            return;
        }

        if self.phase == Phase::Swapping {
            let matched = self.match_all();
            if matched > 0 {
                self.score = self.score.saturating_add(u32::from(matched));
                self.used_tip = false;
            } else if let Some((first, second)) = self.swapped {
                log::debug!("Swap of {:?} and {:?} made no line, reverting", first, second);
                self.swap_contents(first, second);
            }
            self.selected = None;
            self.swapped = None;
        }
        self.transition(PhaseEvent::Settled);
    }

    /// Marks every line of three on the board and returns how many tokens were
    /// newly marked.
    pub fn match_all(&mut self) -> CellCount {
        let (cols, rows) = self.size();
        let mut matched = 0;
        for row in 0..rows {
            for col in 0..cols {
                if col > 0 && col + 1 < cols {
                    matched += self.match3((col, row), (col + 1, row), (col - 1, row));
                }
                if row > 0 && row + 1 < rows {
                    matched += self.match3((col, row), (col, row + 1), (col, row - 1));
                }
            }
        }
        matched
    }

    fn match3(&mut self, a: Coord2, b: Coord2, c: Coord2) -> CellCount {
        let cells = [a, b, c];
        let tokens = cells.map(|cell| *self.token(cell));

        if tokens.iter().all(|token| !token.status().is_matchable()) {
            return 0;
        }
        if tokens
            .iter()
            .any(|token| token.status() == TokenStatus::Deleted)
        {
            return 0;
        }
        let face = tokens[0].face();
        if tokens.iter().any(|token| token.face() != face) {
            return 0;
        }

        let mut matched = 0;
        for cell in cells {
            let token = self.token_mut(cell);
            if token.status() != TokenStatus::Match {
                token.set_status(TokenStatus::Match);
                matched += 1;
            }
        }
        matched
    }

    /// Lets tokens fall into deleted slots, then refills what is left.
    /// Returns whether anything fell.
    pub fn arrange(&mut self) -> bool {
        let (cols, rows) = self.size();
        let mut moved = false;

        'scan: for row in (0..rows).rev() {
            for col in (0..cols).rev() {
                if self.token((col, row)).status() != TokenStatus::Deleted {
                    continue;
                }
                if row == 0 {
                    break 'scan;
                }
                let above = (0..row)
                    .rev()
                    .map(|above| (col, above))
                    .find(|&cell| self.token(cell).status() != TokenStatus::Deleted);
                if let Some(above) = above {
                    self.swap_contents((col, row), above);
                    moved = true;
                }
            }
        }

        self.replace_deleted();
        moved
    }

    /// Replaces every deleted slot with a fresh token of random color.
    pub fn replace_deleted(&mut self) {
        let metrics = self.config.metrics;
        for token in self.gems.iter_mut() {
            if token.status() == TokenStatus::Deleted {
                let color = self.generator.next_color();
                *token = Token::new(token.coords(), Face::Gem(color), TokenStatus::New, &metrics);
            }
        }
    }

    /// Looks for any swap that would complete a line. With `reveal`, flags the
    /// three tokens involved when the player can pay for it (once per stuck
    /// period). Returns false only when no move is left at all.
    pub fn find_possible_match(&mut self, reveal: bool) -> bool {
        if self.phase != Phase::Waiting {
            return false;
        }
        self.clear_possible_match();

        let gems = &self.gems;
        let Some(possible) = find_possible_move(self.config.size, |coords| {
            gems[coords.to_nd_index()].face()
        }) else {
            return false;
        };

        if reveal && (self.score >= self.config.tip_cost || self.used_tip) {
            for cell in possible.cells {
                self.token_mut(cell).set_hinted(true);
            }
            if !self.used_tip {
                self.score -= self.config.tip_cost;
                self.used_tip = true;
                log::debug!("Hint shown at {:?}", possible.cells);
            }
        }
        true
    }

    pub fn clear_possible_match(&mut self) {
        for token in self.gems.iter_mut() {
            token.set_hinted(false);
        }
    }

    /// Marks the 3x3 block around `coords` for deletion, the bomb included.
    pub fn explode(&mut self, coords: Coord2) {
        if let Some(selected) = self.selected.take() {
            if self.token(selected).status() == TokenStatus::Selected {
                self.token_mut(selected).set_status(TokenStatus::Idle);
            }
        }
        for cell in BlastIter::new(coords, self.size()) {
            self.token_mut(cell).set_status(TokenStatus::Match);
        }
        self.transition(PhaseEvent::Detonate);
        log::debug!("Bomb detonated at {:?}", coords);
    }

    /// Spends `bomb_cost` to turn a random slot into a bomb. The slot is
    /// overwritten whatever it currently holds.
    pub fn spawn_bomb(&mut self) -> bool {
        if self.score < self.config.bomb_cost {
            return false;
        }
        self.score -= self.config.bomb_cost;
        self.bomb_count += 1;
        let slot = self.generator.next_slot(self.size());
        self.token_mut(slot).set_face(Face::Bomb);
        log::debug!("Bomb #{} spawned at {:?}", self.bomb_count, slot);
        true
    }

    fn transition(&mut self, event: PhaseEvent) {
        let next = self.phase.on(event);
        if next != self.phase {
            log::debug!("Phase {:?} -> {:?} on {:?}", self.phase, next, event);
            self.phase = next;
        }
    }

    /// Exchanges the contents of two slots, leaving each token to animate from
    /// where it is drawn now to its new slot.
    fn swap_contents(&mut self, a: Coord2, b: Coord2) {
        let (ia, ib) = (a.to_nd_index(), b.to_nd_index());
        self.gems.swap(ia, ib);
        let mut first = self.gems[ia];
        let mut second = self.gems[ib];
        first.swap_targets(&mut second);
        self.gems[ia] = first;
        self.gems[ib] = second;
    }

    fn token(&self, coords: Coord2) -> &Token {
        &self.gems[coords.to_nd_index()]
    }

    fn token_mut(&mut self, coords: Coord2) -> &mut Token {
        &mut self.gems[coords.to_nd_index()]
    }
}

fn deal(generator: &mut impl BoardGenerator, config: &GameConfig) -> Array2<Token> {
    let colors = generator.generate(config);
    let metrics = config.metrics;
    Array2::from_shape_fn(colors.dim(), |(row, col)| {
        let coords = (col as Coord, row as Coord);
        Token::new(coords, Face::Gem(colors[[row, col]]), TokenStatus::Idle, &metrics)
    })
}
