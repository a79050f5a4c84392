/// A cursor for character-by-character scanning of a single line.
///
/// Positions are zero-based character offsets, which is the coordinate
/// system every link record in the markup index uses.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The characters of the line being scanned.
    pub chars: &'a [char],
    /// Current index into `chars`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor at the start of `chars`.
    pub fn new(chars: &'a [char]) -> Self {
        Self { chars, i: 0 }
    }

    /// Creates a cursor positioned at `i`.
    pub fn at(chars: &'a [char], i: usize) -> Self {
        Self { chars, i }
    }

    pub fn pos(&self) -> usize {
        self.i
    }

    /// Peeks at the current character without advancing.
    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.i).copied()
    }

    /// The character immediately before the cursor, if any.
    pub fn prev(&self) -> Option<char> {
        self.i.checked_sub(1).and_then(|p| self.chars.get(p)).copied()
    }

    /// Advances by one character, returning the consumed character.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.chars.get(self.i).copied()?;
        self.i += 1;
        Some(c)
    }

    /// Advances while `pred` holds, returning how many characters were consumed.
    pub fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
        let start = self.i;
        while self.peek().is_some_and(&pred) {
            self.i += 1;
        }
        self.i - start
    }

    /// Finds the next occurrence of `target` at or after the cursor.
    pub fn find(&self, target: char) -> Option<usize> {
        self.chars[self.i.min(self.chars.len())..]
            .iter()
            .position(|&c| c == target)
            .map(|offset| self.i + offset)
    }

    /// The characters from the cursor to the end of the line.
    pub fn rest(&self) -> &'a [char] {
        &self.chars[self.i.min(self.chars.len())..]
    }
}
