pub trait Capitalize {
    fn capitalize(&self) -> String;
}

impl Capitalize for String {
    fn capitalize(&self) -> String {
        let mut chars = self.chars();
        match chars.next() {
            Some(first) => {
                first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
            }
            None => String::new(),
        }
    }
}

/// Whole-number percentage of `part` over `whole`, rounded half up; 0 when `whole` is 0.
pub fn rounded_percentage(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as u64 * 200 + whole as u64) / (whole as u64 * 2)) as u32
}
