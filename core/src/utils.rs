use std::fmt;
use num_enum::TryFromPrimitive;

/// Render a raw wire value as its enum variant name, or as hex when unknown.
pub fn enum_name_or_hex<T>(raw: T::Primitive) -> String
where
    T: TryFromPrimitive + fmt::Debug,
    T::Primitive: fmt::LowerHex,
{
    match T::try_from_primitive(raw) {
        Ok(variant) => format!("{:?}", variant),
        Err(_) => format!("{:#06x}", raw),
    }
}

/// Compare two fragmented byte sequences without linearizing either side.
///
/// Fragment boundaries do not need to line up.
pub fn chunks_equal<'a, A, B>(lhs: A, rhs: B) -> bool
where
    A: IntoIterator<Item = &'a [u8]>,
    B: IntoIterator<Item = &'a [u8]>,
{
    let mut lhs = lhs.into_iter();
    let mut rhs = rhs.into_iter();
    let mut left: &[u8] = &[];
    let mut right: &[u8] = &[];

    loop {
        if left.is_empty() {
            match lhs.next() {
                Some(chunk) => {
                    left = chunk;
                    continue;
                }
                None => return right.is_empty() && rhs.all(|c| c.is_empty()),
            }
        }
        if right.is_empty() {
            match rhs.next() {
                Some(chunk) => {
                    right = chunk;
                    continue;
                }
                None => return false,
            }
        }

        let n = left.len().min(right.len());
        if left[..n] != right[..n] {
            return false;
        }
        left = &left[n..];
        right = &right[n..];
    }
}
