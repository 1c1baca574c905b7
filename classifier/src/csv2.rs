//Copyright 2024 Felix Engl
//
//Licensed under the Apache License, Version 2.0 (the "License");
//you may not use this file except in compliance with the License.
//You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
//Unless required by applicable law or agreed to in writing, software
//distributed under the License is distributed on an "AS IS" BASIS,
//WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//See the License for the specific language governing permissions and
//limitations under the License.

use std::io;
use std::marker::PhantomData;
use csv::{Reader, StringRecord, StringRecordsIntoIter};
use serde::de::DeserializeOwned;

/// Deserializes the rows of a csv with a header, rows that fail are counted and skipped.
pub struct CsvProvider<T, R> {
    header: StringRecord,
    records: StringRecordsIntoIter<R>,
    skipped: usize,
    _produces: PhantomData<T>,
}

impl<T, R> CsvProvider<T, R> where R: io::Read {
    pub fn new(mut reader: Reader<R>) -> csv::Result<Self> {
        let header = reader.headers()?.clone();
        Ok(Self {
            header,
            records: reader.into_records(),
            skipped: 0,
            _produces: PhantomData,
        })
    }
}

impl<T, R> CsvProvider<T, R> {
    pub fn header(&self) -> &StringRecord {
        &self.header
    }

    /// The number of rows skipped so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<T, R> Iterator for CsvProvider<T, R> where T: DeserializeOwned, R: io::Read {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(err) => {
                    log::debug!("Failed to read a csv record: {err}");
                    self.skipped += 1;
                    continue;
                }
            };
            match record.deserialize(Some(&self.header)) {
                Ok(value) => return Some(value),
                Err(err) => {
                    log::debug!("Failed to deserialize the csv record {:?}: {err}", record.position());
                    self.skipped += 1;
                }
            }
        }
    }
}
