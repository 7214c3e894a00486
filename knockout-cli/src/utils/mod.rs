use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::marker::PhantomData;
use std::str::FromStr;

/// Prompts for a single value on stdin.
#[derive(Copy, Clone, Debug)]
pub struct Prompt<'a, T>
where
    T: FromStr,
    T::Err: Display,
{
    msg: &'a str,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T> Prompt<'a, T>
where
    T: FromStr,
    T::Err: Display,
{
    #[inline]
    pub fn new(msg: &'a str) -> Self {
        Self {
            msg,
            _marker: PhantomData,
        }
    }

    /// Reads a single line. Returns `None` once stdin is closed.
    pub fn read(&self) -> io::Result<Option<Result<T, T::Err>>> {
        let stdin = io::stdin();
        let stdout = io::stdout();

        self.read_from(&mut stdin.lock(), &mut stdout.lock())
    }

    /// Read until a valid element is input.
    pub fn read_valid(&self) -> io::Result<Option<T>> {
        loop {
            match self.read()? {
                Some(Ok(val)) => return Ok(Some(val)),
                Some(Err(err)) => println!("Failed to parse input: {}", err),
                None => return Ok(None),
            }
        }
    }

    fn read_from<R, W>(
        &self,
        reader: &mut R,
        writer: &mut W,
    ) -> io::Result<Option<Result<T, T::Err>>>
    where
        R: BufRead,
        W: Write,
    {
        writer.write_all(self.msg.as_bytes())?;
        writer.write_all(b": ")?;
        writer.flush()?;

        let mut string = String::new();
        if reader.read_line(&mut string)? == 0 {
            return Ok(None);
        }

        let len = string.trim_end_matches(&['\r', '\n'][..]).len();
        string.truncate(len);

        Ok(Some(T::from_str(&string)))
    }
}
